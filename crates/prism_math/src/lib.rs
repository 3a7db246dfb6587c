//! Prism math - f64 vectors, rays and intervals.
//!
//! Vectors are `glam::DVec3`. The free functions in [`vector`] spell out the
//! handful of operations the renderer relies on with their exact semantics
//! (argument order included), so shading code reads like the formulas.

// Re-export glam's f64 vector for convenience
pub use glam::{dvec3, DVec3};

mod interval;
mod ray;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;

/// Color type alias (linear RGB, usually 0-1 but lights may exceed 1)
pub type Color = DVec3;
