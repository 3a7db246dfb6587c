use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_core::ImageFormat;
use prism_renderer::{RefractionMode, RenderConfig};

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Output image encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text PPM
    P3,
    /// Binary PPM
    P6,
    Png,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::P3 => ImageFormat::P3,
            OutputFormat::P6 => ImageFormat::P6,
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

/// How refractive surfaces transmit rays
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Refraction {
    /// Bend rays by Snell's law
    Snell,
    /// Pass rays through unbent
    Straight,
}

impl From<Refraction> for RefractionMode {
    fn from(refraction: Refraction) -> Self {
        match refraction {
            Refraction::Snell => RefractionMode::Snell,
            Refraction::Straight => RefractionMode::Straight,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "prism", version)]
#[command(about = "Render a JSON scene description with recursive ray tracing")]
pub struct Args {
    /// Image width in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Scene description file (JSON)
    pub input: PathBuf,

    /// Output image; `.png` writes PNG, anything else plain-text PPM
    pub output: PathBuf,

    /// Force the output encoding instead of guessing from the extension
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum number of reflection/refraction bounces
    #[arg(long, default_value_t = 7)]
    pub max_depth: u32,

    #[arg(long, value_enum, default_value = "snell")]
    pub refraction: Refraction,

    /// Number of render threads (defaults to one per core)
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Option<u32>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn image_format(&self) -> ImageFormat {
        match self.format {
            Some(format) => format.into(),
            None => ImageFormat::from_path(&self.output),
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_max_depth(self.max_depth)
            .with_refraction(self.refraction.into())
    }
}
