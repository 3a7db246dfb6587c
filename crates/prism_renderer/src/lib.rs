//! Prism renderer - recursive ray tracing on the CPU.
//!
//! Casts one primary ray per pixel from the origin through the view window,
//! shades hits with Phong lighting and hard shadows, and follows mirror
//! reflection and refraction up to a fixed depth. Buckets render in parallel
//! on the rayon thread pool.

mod bucket;
mod camera;
mod hittable;
pub mod intersect;
mod renderer;
pub mod shading;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::PinholeCamera;
pub use hittable::{occluded, shoot, HitRecord, Hittable};
pub use renderer::{
    refract, render, render_pixel, shade, trace, RefractionMode, RenderConfig,
};

/// Re-export the math types used in the public API
pub use prism_math::{Color, DVec3, Interval, Ray};
