//! Recursive Whitted-style tracer.
//!
//! Each call carries a [`TraceState`]: the recursion depth and whether the
//! ray currently travels inside a refractive solid. Reflection keeps the
//! medium, refraction toggles it, and both add one to the depth.

use std::cell::Cell;

use prism_core::Scene;
use prism_math::{reflect, refract, DVec3, Ray, EPS};

use crate::hit::{first_intersection, SceneHit};
use crate::options::{RenderMode, RenderOptions};
use crate::shading::direct_lighting;

/// Which side of a refractive surface a ray travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medium {
    Outside,
    Inside,
}

impl Medium {
    pub fn toggled(self) -> Self {
        match self {
            Medium::Outside => Medium::Inside,
            Medium::Inside => Medium::Outside,
        }
    }
}

/// Recursion state threaded through every trace call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceState {
    pub depth: u32,
    pub medium: Medium,
}

impl TraceState {
    /// State of a camera ray.
    pub const PRIMARY: TraceState = TraceState {
        depth: 0,
        medium: Medium::Outside,
    };

    fn reflected(self) -> Self {
        Self {
            depth: self.depth + 1,
            medium: self.medium,
        }
    }

    fn refracted(self) -> Self {
        Self {
            depth: self.depth + 1,
            medium: self.medium.toggled(),
        }
    }
}

/// Counters collected while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of primary and secondary rays traced (shadow rays excluded)
    pub rays: u64,
    /// Deepest recursion level reached
    pub max_depth: u32,
}

/// Radiance of a primary ray and whether it hit anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSample {
    pub radiance: DVec3,
    pub hit: bool,
}

/// Traces rays through a scene for one set of render options.
pub struct Tracer<'a> {
    scene: &'a Scene,
    options: RenderOptions,
    stats: Cell<TraceStats>,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, options: RenderOptions) -> Self {
        Self {
            scene,
            options,
            stats: Cell::new(TraceStats::default()),
        }
    }

    pub fn stats(&self) -> TraceStats {
        self.stats.get()
    }

    /// Trace a camera ray.
    pub fn trace_primary(&self, ray: &Ray) -> PixelSample {
        self.trace_sample(ray, TraceState::PRIMARY)
    }

    /// Radiance arriving along `ray` in the given state.
    pub fn trace(&self, ray: &Ray, state: TraceState) -> DVec3 {
        self.trace_sample(ray, state).radiance
    }

    fn record(&self, state: TraceState) {
        let mut stats = self.stats.get();
        stats.rays += 1;
        stats.max_depth = stats.max_depth.max(state.depth);
        self.stats.set(stats);
    }

    fn trace_sample(&self, ray: &Ray, state: TraceState) -> PixelSample {
        self.record(state);
        let hit = first_intersection(ray, self.scene);

        let radiance = match (self.options.mode, &hit) {
            // Background is white in depth mode, black otherwise
            (RenderMode::Depth, None) => DVec3::ONE,
            (_, None) => DVec3::ZERO,
            (RenderMode::Depth, Some(hit)) => DVec3::splat(hit.intersection.distance()),
            (RenderMode::Normal, Some(hit)) => (hit.intersection.normal() + 1.0) / 2.0,
            (RenderMode::Full, Some(hit)) => self.shade(ray, hit, state),
        };

        PixelSample {
            radiance,
            hit: hit.is_some(),
        }
    }

    fn shade(&self, ray: &Ray, hit: &SceneHit, state: TraceState) -> DVec3 {
        let material = self.scene.material(hit.material);
        let position = hit.intersection.position();
        let normal = hit.intersection.normal();

        // Offset origins so secondary rays do not hit the same surface
        let outer = position + EPS * normal;
        let inner = position - EPS * normal;

        let direct = if material.direct_weight() > EPS {
            direct_lighting(self.scene, material, outer, ray.direction(), normal)
        } else {
            DVec3::ZERO
        };

        let mut result =
            material.ambient_color + material.intensity + direct * material.direct_weight();

        if state.depth >= self.options.depth {
            return result;
        }

        // No reflection while travelling inside a refractive solid
        if material.reflection_weight() > EPS && state.medium == Medium::Outside {
            let reflected = Ray::new(outer, reflect(ray.direction(), normal));
            result += material.reflection_weight() * self.trace(&reflected, state.reflected());
        }

        if material.refraction_weight() > EPS {
            let eta = match state.medium {
                Medium::Inside => material.refraction_index,
                Medium::Outside => 1.0 / material.refraction_index,
            };
            if let Some(direction) = refract(ray.direction(), normal, eta) {
                let refracted = Ray::new(inner, direction);
                let radiance = self.trace(&refracted, state.refracted());
                // The weight applies once, on entering the medium
                result += match state.medium {
                    Medium::Outside => radiance * material.refraction_weight(),
                    Medium::Inside => radiance,
                };
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Light, Material};
    use prism_math::Sphere;

    fn full(depth: u32) -> RenderOptions {
        RenderOptions::new(depth, RenderMode::Full)
    }

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_miss_background_per_mode() {
        let scene = Scene::new("empty");
        let ray = Ray::new(DVec3::ZERO, -DVec3::Z);

        let full_sample = Tracer::new(&scene, full(3)).trace_primary(&ray);
        assert_eq!(full_sample.radiance, DVec3::ZERO);
        assert!(!full_sample.hit);

        let depth_sample =
            Tracer::new(&scene, RenderOptions::new(3, RenderMode::Depth)).trace_primary(&ray);
        assert_eq!(depth_sample.radiance, DVec3::ONE);
        assert!(!depth_sample.hit);

        let normal_sample =
            Tracer::new(&scene, RenderOptions::new(3, RenderMode::Normal)).trace_primary(&ray);
        assert_eq!(normal_sample.radiance, DVec3::ZERO);
    }

    #[test]
    fn test_depth_and_normal_modes() {
        let mut scene = Scene::new("sphere");
        let m = scene.add_material(Material::default());
        scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0), m);
        let ray = Ray::new(DVec3::ZERO, -DVec3::Z);

        let depth = Tracer::new(&scene, RenderOptions::new(0, RenderMode::Depth)).trace_primary(&ray);
        assert!(depth.hit);
        assert!(approx(depth.radiance, DVec3::splat(4.0)));

        let normal =
            Tracer::new(&scene, RenderOptions::new(0, RenderMode::Normal)).trace_primary(&ray);
        assert!(approx(normal.radiance, DVec3::new(0.5, 0.5, 1.0)));
    }

    #[test]
    fn test_ambient_and_emission_without_lights() {
        let mut scene = Scene::new("glow");
        let m = scene.add_material(Material {
            ambient_color: DVec3::new(0.1, 0.2, 0.3),
            intensity: DVec3::splat(0.5),
            ..Default::default()
        });
        scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0), m);

        let ray = Ray::new(DVec3::ZERO, -DVec3::Z);
        let c = Tracer::new(&scene, full(3)).trace_primary(&ray).radiance;
        assert!(approx(c, DVec3::new(0.6, 0.7, 0.8)));
    }

    #[test]
    fn test_direct_light_weighted_by_albedo() {
        let mut scene = Scene::new("lit");
        let m = scene.add_material(Material {
            diffuse_color: DVec3::ONE,
            albedo: DVec3::new(0.5, 0.0, 0.0),
            ..Default::default()
        });
        scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0), m);
        scene.add_light(Light::new(DVec3::ZERO, DVec3::ONE));

        let ray = Ray::new(DVec3::ZERO, -DVec3::Z);
        let c = Tracer::new(&scene, full(0)).trace_primary(&ray).radiance;
        assert!(approx(c, DVec3::splat(0.5)));
    }

    fn mirror_box() -> Scene {
        // Two facing mirrors: a ray between them bounces forever
        let mut scene = Scene::new("mirrors");
        let mirror = scene.add_material(Material {
            ambient_color: DVec3::splat(0.1),
            albedo: DVec3::new(0.0, 1.0, 0.0),
            ..Default::default()
        });
        scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, -1001.0), 1000.0), mirror);
        scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, 1001.0), 1000.0), mirror);
        scene
    }

    #[test]
    fn test_recursion_is_bounded_by_depth() {
        let scene = mirror_box();
        let ray = Ray::new(DVec3::ZERO, -DVec3::Z);

        for max_depth in [0, 1, 4, 9] {
            let tracer = Tracer::new(&scene, full(max_depth));
            let c = tracer.trace_primary(&ray).radiance;

            let stats = tracer.stats();
            assert_eq!(stats.max_depth, max_depth);
            assert_eq!(stats.rays, max_depth as u64 + 1);
            // Each bounce adds the ambient term once
            assert!(approx(c, DVec3::splat(0.1 * (max_depth + 1) as f64)));
        }
    }

    #[test]
    fn test_refraction_through_glass_sphere() {
        let mut scene = Scene::new("glass");
        let glass = scene.add_material(Material {
            refraction_index: 1.5,
            albedo: DVec3::new(0.0, 0.0, 0.5),
            ..Default::default()
        });
        let wall = scene.add_material(Material {
            ambient_color: DVec3::ONE,
            ..Default::default()
        });
        scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0), glass);
        scene.add_sphere(Sphere::new(DVec3::new(0.0, 0.0, -20.0), 5.0), wall);

        // Straight through the center: enter, exit, then hit the wall
        let ray = Ray::new(DVec3::ZERO, -DVec3::Z);
        let tracer = Tracer::new(&scene, full(5));
        let c = tracer.trace_primary(&ray).radiance;

        // Weight applied once on entry, not again on exit
        assert!(approx(c, DVec3::splat(0.5)));
        assert_eq!(tracer.stats().max_depth, 2);
    }

    #[test]
    fn test_total_internal_reflection_skips_refraction() {
        let mut scene = Scene::new("tir");
        let glass = scene.add_material(Material {
            ambient_color: DVec3::splat(0.25),
            refraction_index: 1.5,
            albedo: DVec3::new(0.0, 0.0, 1.0),
            ..Default::default()
        });
        scene.add_sphere(Sphere::new(DVec3::ZERO, 1.0), glass);

        // Start inside the sphere, leaving at a grazing angle
        let origin = DVec3::new(0.0, 0.9, 0.0);
        let ray = Ray::new(origin, DVec3::X);
        let tracer = Tracer::new(&scene, full(5));
        let state = TraceState {
            depth: 0,
            medium: Medium::Inside,
        };
        let c = tracer.trace(&ray, state);

        assert!(c.is_finite());
        assert!(approx(c, DVec3::splat(0.25)));
        assert_eq!(tracer.stats().rays, 1);
    }

    #[test]
    fn test_reflection_suppressed_inside_medium() {
        let scene = mirror_box();
        let ray = Ray::new(DVec3::ZERO, -DVec3::Z);
        let tracer = Tracer::new(&scene, full(5));
        let inside = TraceState {
            depth: 0,
            medium: Medium::Inside,
        };

        let c = tracer.trace(&ray, inside);
        assert!(approx(c, DVec3::splat(0.1)));
        assert_eq!(tracer.stats().rays, 1);
    }
}
