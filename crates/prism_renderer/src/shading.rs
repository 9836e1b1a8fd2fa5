//! Direct illumination from point lights with hard shadows.

use prism_core::{Light, Material, Scene};
use prism_math::{reflect, DVec3, Ray};

use crate::hit::is_occluded;

/// Diffuse + specular contribution of one light at `origin`.
///
/// `origin` should already be offset off the surface. Returns zero when any
/// primitive lies between `origin` and the light.
pub fn light_contribution(
    light: &Light,
    scene: &Scene,
    material: &Material,
    origin: DVec3,
    view_dir: DVec3,
    normal: DVec3,
) -> DVec3 {
    let to_light = light.position - origin;
    let light_dist = to_light.length();
    if light_dist == 0.0 {
        return DVec3::ZERO;
    }

    let shadow_ray = Ray::new(origin, to_light);
    if is_occluded(&shadow_ray, scene, light_dist) {
        return DVec3::ZERO;
    }

    let light_dir = shadow_ray.direction();
    // Clamp before powf: negative bases with fractional exponents are NaN
    let diffuse = light_dir.dot(normal).max(0.0);
    let specular = reflect(-light_dir, normal)
        .dot(-view_dir.normalize())
        .max(0.0)
        .powf(material.specular_exponent);

    material.diffuse_color * light.intensity * diffuse
        + material.specular_color * light.intensity * specular
}

/// Sum of [`light_contribution`] over every light in the scene.
pub fn direct_lighting(
    scene: &Scene,
    material: &Material,
    origin: DVec3,
    view_dir: DVec3,
    normal: DVec3,
) -> DVec3 {
    scene
        .lights()
        .iter()
        .map(|light| light_contribution(light, scene, material, origin, view_dir, normal))
        .fold(DVec3::ZERO, |acc, c| acc + c)
}
