//! JSON render configuration merged with command line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use prism_renderer::{CameraOptions, RenderOptions};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

/// Contents of a `--config` file. Missing sections and fields use defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub camera: CameraOptions,
    pub render: RenderOptions,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Apply flags given on the command line.
    pub fn apply_args(&mut self, args: &Args) {
        let camera = &mut self.camera;
        if let Some(width) = args.width {
            camera.screen_width = width;
        }
        if let Some(height) = args.height {
            camera.screen_height = height;
        }
        if let Some(fov) = args.fov {
            camera.fov = fov.to_radians();
        }
        if let Some(look_from) = args.look_from {
            camera.look_from = look_from;
        }
        if let Some(look_to) = args.look_to {
            camera.look_to = look_to;
        }

        if let Some(depth) = args.depth {
            self.render.depth = depth;
        }
        if let Some(mode) = args.mode {
            self.render.mode = mode.into();
        }
    }
}

/// Resolve the final options from `--config` and the remaining flags.
pub fn resolve(args: &Args) -> Result<ConfigFile> {
    let mut config = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    config.apply_args(args);
    Ok(config)
}
