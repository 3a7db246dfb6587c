//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) in scanline order. Buckets are
//! rendered in parallel with rayon and blitted back into one buffer.

use prism_core::{Pixel, PixelBuffer, Scene};

use crate::camera::PinholeCamera;
use crate::renderer::{render_pixel, RenderConfig};

/// A rectangular region of the image, in image coordinates (row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Row of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering a `width` x `height` image, in scanline order.
///
/// Edge buckets are clipped to the image. `bucket_size` must be non-zero.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    debug_assert!(bucket_size > 0);

    let mut buckets = Vec::new();
    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    buckets
}

/// Render a single bucket. Returns pixels in row-major order within the
/// bucket.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    camera: &PinholeCamera,
    config: &RenderConfig,
) -> Vec<Pixel> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let row = bucket.y + local_y;
            pixels.push(render_pixel(scene, camera, x, row, config));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixels in row-major order
    pub pixels: Vec<Pixel>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Pixel>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into place in `image`.
    pub fn blit(&self, image: &mut PixelBuffer) {
        let width = self.bucket.width as usize;
        for (local_y, row) in self.pixels.chunks_exact(width).enumerate() {
            for (local_x, pixel) in row.iter().enumerate() {
                image.set(
                    self.bucket.x + local_x as u32,
                    self.bucket.y + local_y as u32,
                    *pixel,
                );
            }
        }
    }
}
