//! Image file output.
//!
//! Supports the plain-text PPM format (P3, the default), binary PPM (P6)
//! and PNG. All encoders write the buffer top row first.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::raster::PixelBuffer;

/// Longest line a P3 file may contain.
pub const P3_MAX_LINE: usize = 70;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode PNG: {0}")]
    Png(#[from] image::ImageError),
}

/// On-disk image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Plain-text PPM
    P3,
    /// Binary PPM
    P6,
    Png,
}

impl ImageFormat {
    /// Pick a format from the file extension: `.png` is PNG, anything else is
    /// plain-text PPM.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => ImageFormat::Png,
            _ => ImageFormat::P3,
        }
    }
}

/// Write `buffer` to `path`, creating or truncating the file.
pub fn write_image(buffer: &PixelBuffer, path: &Path, format: ImageFormat) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    match format {
        ImageFormat::P3 | ImageFormat::P6 => {
            let file = File::create(path).map_err(io_err)?;
            let mut writer = BufWriter::new(file);
            if format == ImageFormat::P3 {
                encode_p3(buffer, &mut writer).map_err(io_err)?;
            } else {
                encode_p6(buffer, &mut writer).map_err(io_err)?;
            }
            writer.flush().map_err(io_err)?;
        }
        ImageFormat::Png => {
            image::save_buffer_with_format(
                path,
                buffer.as_bytes(),
                buffer.width(),
                buffer.height(),
                image::ColorType::Rgb8,
                image::ImageFormat::Png,
            )?;
        }
    }

    info!(
        "Wrote {}x{} image to {} ({:?})",
        buffer.width(),
        buffer.height(),
        path.display(),
        format
    );
    Ok(())
}

/// Encode as plain-text PPM.
///
/// Pixels are written as `r g b` groups, packed onto lines of at most
/// [`P3_MAX_LINE`] characters without splitting a group.
pub fn encode_p3<W: Write>(buffer: &PixelBuffer, writer: &mut W) -> io::Result<()> {
    write!(writer, "P3\n{} {}\n255\n", buffer.width(), buffer.height())?;

    let mut line = String::with_capacity(P3_MAX_LINE + 1);
    for pixel in buffer.pixels() {
        let group = format!("{} {} {}", pixel.r, pixel.g, pixel.b);
        if !line.is_empty() && line.len() + 1 + group.len() > P3_MAX_LINE {
            writeln!(writer, "{}", line)?;
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&group);
    }
    if !line.is_empty() {
        writeln!(writer, "{}", line)?;
    }

    Ok(())
}

/// Encode as binary PPM.
pub fn encode_p6<W: Write>(buffer: &PixelBuffer, writer: &mut W) -> io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", buffer.width(), buffer.height())?;
    writer.write_all(buffer.as_bytes())
}
