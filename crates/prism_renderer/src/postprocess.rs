//! Conversion of the linear radiance buffer into an 8-bit image.

use prism_math::DVec3;

use crate::output::Image;
use crate::options::RenderMode;

const GAMMA: f64 = 2.2;

/// Linear radiance per pixel, addressed by (row, col).
pub struct RadianceBuffer {
    width: u32,
    height: u32,
    pixels: Vec<DVec3>,
}

impl RadianceBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![DVec3::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, row: u32, col: u32) -> DVec3 {
        self.pixels[self.index(row, col)]
    }

    pub fn set(&mut self, row: u32, col: u32, value: DVec3) {
        let i = self.index(row, col);
        self.pixels[i] = value;
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Largest channel over all pixels accepted by `mask`.
    fn max_channel(&self, mask: Option<&HitMask>) -> f64 {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(i, _)| mask.map_or(true, |m| m.hits[*i]))
            .map(|(_, p)| p.max_element())
            .fold(0.0, f64::max)
    }
}

/// Per-pixel record of whether the primary ray hit anything.
pub struct HitMask {
    width: u32,
    hits: Vec<bool>,
}

impl HitMask {
    /// Create a mask with every pixel marked as a miss.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            hits: vec![false; width as usize * height as usize],
        }
    }

    pub fn is_hit(&self, row: u32, col: u32) -> bool {
        self.hits[row as usize * self.width as usize + col as usize]
    }

    pub fn set_hit(&mut self, row: u32, col: u32, hit: bool) {
        self.hits[row as usize * self.width as usize + col as usize] = hit;
    }
}

/// Highlight compression normalized so that `max_channel` maps near 1.
fn tone_map(v: f64, max_sq: f64) -> f64 {
    v * (1.0 + v / max_sq) / (1.0 + v)
}

fn to_byte(v: f64) -> u8 {
    // NaN clamps to 0
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

fn to_rgb(c: DVec3) -> [u8; 3] {
    [to_byte(c.x), to_byte(c.y), to_byte(c.z)]
}

/// Map a radiance buffer to displayable pixels for the given mode.
///
/// `mask` is consulted only in depth mode: missed pixels are excluded from
/// normalization and keep their background value.
pub fn postprocess(buffer: &RadianceBuffer, mode: RenderMode, mask: Option<&HitMask>) -> Image {
    let mask = match mode {
        RenderMode::Depth => mask,
        _ => None,
    };

    let mut max_channel = buffer.max_channel(mask);
    if max_channel == 0.0 {
        max_channel = 1.0;
    }
    let max_sq = max_channel * max_channel;

    let mut image = Image::new(buffer.width(), buffer.height());
    for row in 0..buffer.height() {
        for col in 0..buffer.width() {
            let v = buffer.get(row, col);
            let mapped = match mode {
                RenderMode::Depth => {
                    if mask.map_or(true, |m| m.is_hit(row, col)) {
                        v / max_channel
                    } else {
                        v
                    }
                }
                RenderMode::Normal => v,
                RenderMode::Full => {
                    let toned = DVec3::new(
                        tone_map(v.x, max_sq),
                        tone_map(v.y, max_sq),
                        tone_map(v.z, max_sq),
                    );
                    toned.powf(1.0 / GAMMA)
                }
            };
            image.set_pixel(to_rgb(mapped), row, col);
        }
    }

    image
}
