//! Prism renderer: a recursive Whitted-style CPU ray tracer.
//!
//! Primary rays come from a pinhole [`Camera`], the [`Tracer`] shades each
//! hit with Phong direct lighting plus recursive reflection and refraction,
//! and [`postprocess`] maps the linear radiance buffer to an 8-bit [`Image`].

mod camera;
mod error;
mod hit;
mod output;
mod options;
mod postprocess;
mod renderer;
mod shading;
mod tracer;

pub use camera::{Camera, CameraOptions};
pub use error::{RenderError, RenderResult};
pub use hit::{first_intersection, is_occluded, SceneHit};
pub use output::Image;
pub use options::{RenderMode, RenderOptions};
pub use postprocess::{postprocess, HitMask, RadianceBuffer};
pub use renderer::{render, render_scene, trace_buffer};
pub use shading::{direct_lighting, light_contribution};
pub use tracer::{Medium, PixelSample, TraceState, TraceStats, Tracer};
