use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_math::DVec3;
use prism_renderer::RenderMode;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Depth,
    Normal,
    Full,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Depth => RenderMode::Depth,
            ModeArg::Normal => RenderMode::Normal,
            ModeArg::Full => RenderMode::Full,
        }
    }
}

/// Parse a vector written as `x,y,z`.
pub fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{}'", s));
    }

    let mut v = [0.0; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("'{}' is not a number", part))?;
    }
    Ok(DVec3::from_array(v))
}

/// Command line arguments.
///
/// Camera and render flags override values from `--config`.
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "Render an OBJ scene with a recursive Whitted ray tracer")]
pub struct Args {
    /// Scene file (.obj with sphere and light extension records)
    pub scene: PathBuf,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// JSON file with `camera` and `render` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f64>,

    /// Eye position as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub look_from: Option<DVec3>,

    /// Look-at point as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub look_to: Option<DVec3>,

    /// Maximum reflection/refraction depth
    #[arg(short, long)]
    pub depth: Option<u32>,

    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Log level: off, error, warn, info, debug or trace. `RUST_LOG` refines it
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}
