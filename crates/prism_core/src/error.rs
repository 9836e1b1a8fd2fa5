//! Errors produced while loading a scene description.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid number '{value}' at line {line}")]
    InvalidNumber { line: usize, value: String },

    #[error("unknown material '{name}' at line {line}")]
    UnknownMaterial { line: usize, name: String },

    #[error("malformed OBJ/MTL data: {0}")]
    Format(#[from] tobj::LoadError),

    #[error("vertex index {index} out of range")]
    IndexOutOfRange { index: u32 },

    #[error("invalid value '{value}' for '{key}' in material '{material}'")]
    InvalidParameter {
        material: String,
        key: String,
        value: String,
    },

    #[error("face with {count} vertices at line {line}, at least 3 required")]
    DegenerateFace { line: usize, count: usize },

    #[error("in material library '{name}': {source}")]
    Library {
        name: String,
        #[source]
        source: Box<SceneError>,
    },
}

/// Result type for scene loading operations.
pub type SceneResult<T> = Result<T, SceneError>;
