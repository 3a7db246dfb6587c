//! Primary ray generation.

use prism_core::Camera;
use prism_math::{DVec3, Ray};

/// Maps pixels of a `width` x `height` image onto the scene camera's view
/// window at z = 1. The eye is at the origin.
#[derive(Debug, Clone, Copy)]
pub struct PinholeCamera {
    pub image_width: u32,
    pub image_height: u32,

    view_width: f64,
    view_height: f64,
    pixel_width: f64,
    pixel_height: f64,
}

impl PinholeCamera {
    pub fn new(camera: &Camera, image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            view_width: camera.width,
            view_height: camera.height,
            pixel_width: camera.width / image_width as f64,
            pixel_height: camera.height / image_height as f64,
        }
    }

    /// Unit ray through the center of scene pixel (x, y), with y counted
    /// upward from the bottom of the view.
    pub fn scene_ray(&self, x: u32, y: u32) -> Ray {
        let target = DVec3::new(
            -self.view_width / 2.0 + self.pixel_width * (x as f64 + 0.5),
            -self.view_height / 2.0 + self.pixel_height * (y as f64 + 0.5),
            1.0,
        );
        Ray::new(DVec3::ZERO, target).normalized()
    }

    /// Unit ray for image pixel (x, row), with row 0 at the top.
    pub fn get_ray(&self, x: u32, row: u32) -> Ray {
        self.scene_ray(x, self.image_height - 1 - row)
    }
}
