//! Prism command-line renderer.
//!
//! `prism [OPTIONS] <WIDTH> <HEIGHT> <INPUT> <OUTPUT>`

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use prism_core::{load_scene, write_image};
use prism_renderer::render;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("Starting Prism");

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .build_global()
            .context("failed to configure the render thread pool")?;
    }

    let scene = load_scene(&args.input)
        .with_context(|| format!("failed to load scene {}", args.input.display()))?;

    let image = render(&scene, args.width, args.height, &args.render_config());

    write_image(&image, &args.output, args.image_format())
        .with_context(|| format!("failed to write image {}", args.output.display()))?;

    Ok(())
}
