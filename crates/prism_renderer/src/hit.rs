//! Nearest-hit and occlusion queries over a scene.
//!
//! Both queries are a linear scan over every sphere and then every triangle.

use prism_core::{MaterialId, PrimitiveRef, Scene};
use prism_math::{barycentric_coords, intersect_sphere, intersect_triangle, Intersection, Ray};

/// The nearest intersection of a ray with the scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneHit {
    pub intersection: Intersection,
    pub material: MaterialId,
    pub primitive: PrimitiveRef,
}

impl SceneHit {
    fn is_closer(candidate: &Intersection, current: &Option<SceneHit>) -> bool {
        current
            .as_ref()
            .map_or(true, |hit| candidate.distance() < hit.intersection.distance())
    }
}

/// Find the closest primitive hit by `ray`.
///
/// Ties keep the primitive found first (spheres before triangles, then
/// declaration order). Triangles with vertex normals report the raw
/// barycentric blend of those normals, oriented against the ray.
pub fn first_intersection(ray: &Ray, scene: &Scene) -> Option<SceneHit> {
    let mut nearest: Option<SceneHit> = None;

    for (i, object) in scene.sphere_objects().iter().enumerate() {
        if let Some(intersection) = intersect_sphere(ray, &object.sphere) {
            if SceneHit::is_closer(&intersection, &nearest) {
                nearest = Some(SceneHit {
                    intersection,
                    material: object.material,
                    primitive: PrimitiveRef::Sphere(i),
                });
            }
        }
    }

    for (i, object) in scene.triangle_objects().iter().enumerate() {
        if let Some(intersection) = intersect_triangle(ray, &object.polygon) {
            if SceneHit::is_closer(&intersection, &nearest) {
                nearest = Some(SceneHit {
                    intersection,
                    material: object.material,
                    primitive: PrimitiveRef::Triangle(i),
                });
            }
        }
    }

    if let Some(hit) = nearest.as_mut() {
        if let PrimitiveRef::Triangle(i) = hit.primitive {
            let object = &scene.triangle_objects()[i];
            if let Some(normals) = object.normals() {
                let w = barycentric_coords(&object.polygon, hit.intersection.position());
                // Raw blend; shorter than unit where the normals diverge
                let normal = normals[0] * w.x + normals[1] * w.y + normals[2] * w.z;
                if normal.dot(ray.direction()) > 0.0 {
                    hit.intersection.set_normal(-normal);
                } else {
                    hit.intersection.set_normal(normal);
                }
            }
        }
    }

    nearest
}

/// Whether any primitive lies on `ray` strictly closer than `max_distance`.
pub fn is_occluded(ray: &Ray, scene: &Scene, max_distance: f64) -> bool {
    let blocks = |hit: Option<Intersection>| hit.map_or(false, |h| h.distance() < max_distance);

    scene
        .sphere_objects()
        .iter()
        .any(|o| blocks(intersect_sphere(ray, &o.sphere)))
        || scene
            .triangle_objects()
            .iter()
            .any(|o| blocks(intersect_triangle(ray, &o.polygon)))
}
