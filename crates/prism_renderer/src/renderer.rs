//! Render driver: camera rays, tracing and postprocessing.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use prism_core::{load_scene, Scene};

use crate::camera::{Camera, CameraOptions};
use crate::error::RenderResult;
use crate::output::Image;
use crate::options::{RenderMode, RenderOptions};
use crate::postprocess::{postprocess, HitMask, RadianceBuffer};
use crate::tracer::{TraceStats, Tracer};

/// Load the scene at `scene_path` and render it.
pub fn render<P: AsRef<Path>>(
    scene_path: P,
    camera: &CameraOptions,
    options: &RenderOptions,
) -> RenderResult<Image> {
    let scene = load_scene(scene_path)?;
    Ok(render_scene(&scene, camera, options))
}

/// Render an already loaded scene.
pub fn render_scene(scene: &Scene, camera: &CameraOptions, options: &RenderOptions) -> Image {
    info!(
        "Rendering '{}' ({} primitives, {} lights) at {}x{} (mode {}, depth {})",
        scene.name,
        scene.primitive_count(),
        scene.lights().len(),
        camera.screen_width,
        camera.screen_height,
        options.mode,
        options.depth
    );
    let start = Instant::now();

    let (buffer, mask, stats) = trace_buffer(scene, camera, options);
    let image = postprocess(&buffer, options.mode, mask.as_ref());

    info!("Render finished in {:.2?}", start.elapsed());
    debug!(
        "Traced {} rays, deepest recursion {}",
        stats.rays, stats.max_depth
    );
    image
}

/// Trace every pixel into a linear radiance buffer.
///
/// A hit mask is recorded only in depth mode.
pub fn trace_buffer(
    scene: &Scene,
    camera: &CameraOptions,
    options: &RenderOptions,
) -> (RadianceBuffer, Option<HitMask>, TraceStats) {
    let width = camera.screen_width;
    let height = camera.screen_height;
    let view = Camera::new(camera);
    let tracer = Tracer::new(scene, *options);

    let mut buffer = RadianceBuffer::new(width, height);
    let mut mask = match options.mode {
        RenderMode::Depth => Some(HitMask::new(width, height)),
        _ => None,
    };

    for row in 0..height {
        for col in 0..width {
            let sample = tracer.trace_primary(&view.get_ray(row, col));
            buffer.set(row, col, sample.radiance);
            if let Some(mask) = mask.as_mut() {
                mask.set_hit(row, col, sample.hit);
            }
        }
    }

    (buffer, mask, tracer.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Light, Material};
    use prism_math::{DVec3, Sphere};

    fn lit_sphere() -> Scene {
        let mut scene = Scene::new("lit_sphere");
        let red = scene.add_material(Material {
            diffuse_color: DVec3::new(0.8, 0.1, 0.1),
            specular_color: DVec3::splat(0.5),
            specular_exponent: 20.0,
            ambient_color: DVec3::splat(0.05),
            ..Default::default()
        });
        scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, -4.0), 1.0), red);
        scene.add_light(Light::new(DVec3::new(2.0, 3.0, 0.0), DVec3::ONE));
        scene
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = lit_sphere();
        let camera = CameraOptions::new(24, 16);
        for mode in [RenderMode::Depth, RenderMode::Normal, RenderMode::Full] {
            let options = RenderOptions::new(3, mode);
            let a = render_scene(&scene, &camera, &options);
            let b = render_scene(&scene, &camera, &options);
            assert_eq!(a.as_bytes(), b.as_bytes());
        }
    }

    #[test]
    fn test_normal_mode_center_pixel() {
        let scene = lit_sphere();
        // Odd size so the center pixel looks straight down -Z
        let camera = CameraOptions::new(9, 9);
        let image = render_scene(&scene, &camera, &RenderOptions::new(0, RenderMode::Normal));

        let [r, g, b] = image.pixel(4, 4);
        assert!((r as i32 - 127).abs() <= 1);
        assert!((g as i32 - 127).abs() <= 1);
        assert!(b >= 254);
        // Corners miss the sphere
        assert_eq!(image.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_depth_mode_background_is_white() {
        let scene = lit_sphere();
        let camera = CameraOptions::new(9, 9);
        let (_, mask, _) = trace_buffer(&scene, &camera, &RenderOptions::new(0, RenderMode::Depth));
        let mask = mask.unwrap();
        assert!(mask.is_hit(4, 4));
        assert!(!mask.is_hit(0, 0));

        let image = render_scene(&scene, &camera, &RenderOptions::new(0, RenderMode::Depth));
        assert_eq!(image.pixel(0, 0), [255, 255, 255]);
        // The closest point is not the farthest hit
        assert!(image.pixel(4, 4)[0] < 255);
    }

    #[test]
    fn test_mask_only_in_depth_mode() {
        let scene = lit_sphere();
        let camera = CameraOptions::new(4, 4);
        let (buffer, mask, stats) =
            trace_buffer(&scene, &camera, &RenderOptions::new(3, RenderMode::Full));
        assert!(mask.is_none());
        assert_eq!(buffer.width(), 4);
        assert_eq!(stats.rays, 16);
    }

    #[test]
    fn test_full_mode_lit_side_brighter() {
        let scene = lit_sphere();
        let camera = CameraOptions::new(33, 33);
        let image = render_scene(&scene, &camera, &RenderOptions::default());

        // Light sits up and to the right
        let lit = image.pixel(14, 18)[0];
        let shaded = image.pixel(18, 14)[0];
        assert!(lit > shaded, "lit {lit} shaded {shaded}");
    }
}
