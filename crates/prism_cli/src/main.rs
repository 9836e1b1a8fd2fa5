//! Prism - render an OBJ scene to an image file.

mod cli;
mod config;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level);

    let config = config::resolve(&args)?;
    let image = prism_renderer::render(&args.scene, &config.camera, &config.render)
        .with_context(|| format!("failed to render {}", args.scene.display()))?;

    image
        .save(&args.output)
        .with_context(|| format!("failed to save {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}
