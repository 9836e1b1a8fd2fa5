//! 8-bit RGB output image.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::RenderResult;

/// Fixed-size RGB image addressed by (row, col).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    buffer: RgbImage,
}

impl Image {
    /// Create a black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn set_pixel(&mut self, rgb: [u8; 3], row: u32, col: u32) {
        self.buffer.put_pixel(col, row, Rgb(rgb));
    }

    pub fn pixel(&self, row: u32, col: u32) -> [u8; 3] {
        self.buffer.get_pixel(col, row).0
    }

    /// Raw row-major RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Write the image to disk. The format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.buffer.save(path.as_ref())?;
        Ok(())
    }
}
