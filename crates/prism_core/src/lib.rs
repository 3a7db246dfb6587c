//! Prism Core - scene model, scene files and image output.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `Surface`, `Material`, `Light`
//! - **Scene files**: loading the JSON scene description into a validated `Scene`
//! - **Raster output**: `PixelBuffer` and the PPM (P3/P6) and PNG encoders
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{load_scene, write_image, ImageFormat};
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.surfaces().len(),
//!     scene.lights().len());
//! ```

pub mod description;
pub mod output;
pub mod raster;
pub mod scene;

// Re-export commonly used types
pub use description::{load_scene, parse_scene, SceneError, SceneResult};
pub use output::{write_image, ImageFormat, OutputError};
pub use raster::{Pixel, PixelBuffer};
pub use scene::{
    Camera, Light, Material, Scene, SceneBuilder, Shape, Surface, ValidationError, MAX_LIGHTS,
    MAX_SURFACES,
};
