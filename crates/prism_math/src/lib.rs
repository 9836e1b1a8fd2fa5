//! Prism math - vector algebra and ray/primitive geometry.
//!
//! Vectors are `glam`'s double precision `DVec3`; the tracer works in `f64`
//! throughout so that epsilon offsets and basis orthogonality hold tightly.

// Re-export glam for convenience
pub use glam::*;

mod geometry;
mod ray;

pub use geometry::{
    barycentric_coords, intersect_sphere, intersect_triangle, reflect, refract, Intersection,
    Sphere, Triangle,
};
pub use ray::Ray;

/// Tolerance used for surface offsets, parallel tests and albedo thresholds.
pub const EPS: f64 = 1e-6;

/// Global up axis used as the camera reference.
pub const WORLD_UP: DVec3 = DVec3::Y;

/// Fallback axis used when the view direction is parallel to [`WORLD_UP`].
pub const WORLD_RIGHT: DVec3 = DVec3::X;
