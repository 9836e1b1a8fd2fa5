//! Render options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the tracer computes for each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Distance to the nearest hit, normalized over the image
    Depth,
    /// Surface normal mapped from [-1, 1] to [0, 1]
    Normal,
    /// Recursive Whitted shading
    #[default]
    Full,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderMode::Depth => "depth",
            RenderMode::Normal => "normal",
            RenderMode::Full => "full",
        };
        f.write_str(name)
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "depth" => Ok(RenderMode::Depth),
            "normal" => Ok(RenderMode::Normal),
            "full" => Ok(RenderMode::Full),
            other => Err(format!("unknown render mode '{}'", other)),
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Maximum reflection/refraction recursion depth
    pub depth: u32,
    pub mode: RenderMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth: 3,
            mode: RenderMode::Full,
        }
    }
}

impl RenderOptions {
    pub fn new(depth: u32, mode: RenderMode) -> Self {
        Self { depth, mode }
    }
}
