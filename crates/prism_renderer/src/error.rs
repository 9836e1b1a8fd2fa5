//! Error types for rendering.

use prism_core::SceneError;
use thiserror::Error;

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to load scene")]
    Scene(#[from] SceneError),

    #[error("failed to write image")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
