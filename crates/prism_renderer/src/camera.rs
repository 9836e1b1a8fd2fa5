//! Pinhole camera for primary ray generation.

use prism_math::{DVec3, Ray, EPS, WORLD_RIGHT, WORLD_UP};
use serde::{Deserialize, Serialize};

/// View parameters for a render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Eye position
    pub look_from: DVec3,
    /// Point the camera looks at
    pub look_to: DVec3,
    /// Vertical field of view in radians
    pub fov: f64,
    /// Image width in pixels
    pub screen_width: u32,
    /// Image height in pixels
    pub screen_height: u32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            look_from: DVec3::ZERO,
            look_to: DVec3::new(0.0, 0.0, -1.0),
            fov: std::f64::consts::FRAC_PI_2,
            screen_width: 640,
            screen_height: 480,
        }
    }
}

impl CameraOptions {
    /// Create options for an image of the given size with default placement.
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Default::default()
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: DVec3, look_to: DVec3) -> Self {
        self.look_from = look_from;
        self.look_to = look_to;
        self
    }

    /// Set the vertical field of view in radians.
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }
}

/// Camera with a precomputed image plane one unit in front of the eye.
///
/// `right` and `up` are scaled to the size of one pixel, so pixel `(i, j)`
/// lies at `base + j * right - i * up`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: DVec3,
    forward: DVec3,
    right: DVec3,
    up: DVec3,
    base: DVec3,
}

impl Camera {
    pub fn new(options: &CameraOptions) -> Self {
        let forward = (options.look_to - options.look_from).normalize();

        let dot = forward.dot(WORLD_UP);
        let (right, up) = if dot < -1.0 + EPS || 1.0 - EPS < dot {
            // Looking straight up or down, WORLD_UP gives no horizon
            let up = WORLD_RIGHT.cross(forward).normalize();
            (forward.cross(up), up)
        } else {
            let right = forward.cross(WORLD_UP).normalize();
            (right, right.cross(forward))
        };

        let width = options.screen_width as f64;
        let height = options.screen_height as f64;
        let delta = 2.0 * (options.fov / 2.0).tan() / height;
        let right = right * delta;
        let up = up * delta;

        let base = forward + up * (height - 1.0) / 2.0 - right * (width - 1.0) / 2.0;

        Self {
            origin: options.look_from,
            forward,
            right,
            up,
            base,
        }
    }

    /// Primary ray through pixel (`row`, `col`); rows grow downwards.
    pub fn get_ray(&self, row: u32, col: u32) -> Ray {
        Ray::new(
            self.origin,
            self.base + col as f64 * self.right - row as f64 * self.up,
        )
    }

    /// Unit view direction.
    pub fn forward(&self) -> DVec3 {
        self.forward
    }

    /// Screen-right step of one pixel.
    pub fn right(&self) -> DVec3 {
        self.right
    }

    /// Screen-up step of one pixel.
    pub fn up(&self) -> DVec3 {
        self.up
    }
}
