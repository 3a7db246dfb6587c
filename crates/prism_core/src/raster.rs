//! 8-bit RGB pixel buffer.
//!
//! The renderer fills a [`PixelBuffer`] and the encoders in
//! [`crate::output`] serialize it. Rows are stored top-down: row 0 is the
//! top of the image.

use bytemuck::{Pod, Zeroable};
use prism_math::{Color, Interval};

/// One 8-bit RGB pixel.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert a linear color to 8 bits: clamp each channel to [0, 1], scale
    /// by 255 and truncate. NaN channels become 0.
    pub fn from_color(color: Color) -> Self {
        let channel = |c: f64| (255.0 * Interval::UNIT.clamp(c)) as u8;
        Self {
            r: channel(color.x),
            g: channel(color.y),
            b: channel(color.z),
        }
    }
}

/// Row-major, top-down image of [`Pixel`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y counted from the top.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// One image row, left to right.
    pub fn row(&self, y: u32) -> &[Pixel] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// All pixels in storage order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Raw `r g b r g b ...` bytes in storage order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}
