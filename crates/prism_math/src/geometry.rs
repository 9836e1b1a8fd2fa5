//! Ray/primitive intersection and the reflection/refraction vector formulas.
//!
//! Every intersection reports its normal oriented against the incoming ray,
//! so `position + EPS * normal` is always on the side the ray came from.

use crate::{Ray, DVec3, EPS};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// A triangle primitive given by its three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [DVec3; 3],
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Get the i-th vertex (0, 1 or 2).
    pub fn vertex(&self, i: usize) -> DVec3 {
        self.vertices[i]
    }
}

/// Result of a successful ray/primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    distance: f64,
    position: DVec3,
    normal: DVec3,
}

impl Intersection {
    pub fn new(distance: f64, position: DVec3, normal: DVec3) -> Self {
        Self {
            distance,
            position,
            normal,
        }
    }

    /// Distance from the ray origin to the hit point.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Replace the surface normal (used for smooth-shaded triangles).
    pub fn set_normal(&mut self, normal: DVec3) {
        self.normal = normal;
    }
}

/// Orient `normal` so that it points against `direction`.
#[inline]
fn face_forward(normal: DVec3, direction: DVec3) -> DVec3 {
    if normal.dot(direction) > 0.0 {
        -normal
    } else {
        normal
    }
}

/// Intersect a ray with a sphere.
///
/// Returns the nearest hit in front of the origin. When the origin is inside
/// the sphere this is the exit point, with the normal pointing inwards.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<Intersection> {
    let oc = sphere.center - ray.origin();
    let a = ray.direction().length_squared();
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - sphere.radius * sphere.radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in front of the origin
    let mut root = (h - sqrtd) / a;
    if root <= 0.0 {
        root = (h + sqrtd) / a;
        if root <= 0.0 {
            return None;
        }
    }

    let position = ray.at(root);
    let outward_normal = (position - sphere.center).normalize_or_zero();
    Some(Intersection::new(
        root,
        position,
        face_forward(outward_normal, ray.direction()),
    ))
}

/// Möller-Trumbore ray-triangle intersection.
///
/// The reported normal is the flat face normal, oriented against the ray.
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle) -> Option<Intersection> {
    let [v0, v1, v2] = triangle.vertices;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle. `a` scales with the squared edge length,
    // so the threshold is EPS squared
    if a.abs() < EPS * EPS {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t <= 0.0 {
        return None;
    }

    let normal = edge1.cross(edge2).normalize_or_zero();
    Some(Intersection::new(
        t,
        ray.at(t),
        face_forward(normal, ray.direction()),
    ))
}

/// Barycentric weights of `point` with respect to the triangle's vertices.
///
/// Computed from sub-triangle areas; for points inside the triangle the
/// weights are non-negative and sum to one.
pub fn barycentric_coords(triangle: &Triangle, point: DVec3) -> DVec3 {
    let [v0, v1, v2] = triangle.vertices;
    let total = (v1 - v0).cross(v2 - v0).length();
    if total == 0.0 {
        return DVec3::new(1.0, 0.0, 0.0);
    }
    let w0 = (v1 - point).cross(v2 - point).length();
    let w1 = (v2 - point).cross(v0 - point).length();
    let w2 = (v0 - point).cross(v1 - point).length();
    DVec3::new(w0, w1, w2) / total
}

/// Reflect a direction about a normal.
#[inline]
pub fn reflect(direction: DVec3, normal: DVec3) -> DVec3 {
    let d = direction.normalize();
    d - 2.0 * d.dot(normal) * normal
}

/// Refract a direction through a surface with relative index `eta`
/// (incident index over transmitted index).
///
/// `normal` must point against `direction`. Returns `None` on total
/// internal reflection.
pub fn refract(direction: DVec3, normal: DVec3, eta: f64) -> Option<DVec3> {
    let d = direction.normalize();
    let cos_i = -normal.dot(d);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * d + (eta * cos_i - k.sqrt()) * normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        let hit = intersect_sphere(&ray, &sphere).unwrap();
        assert!((hit.distance() - 0.5).abs() < 1e-9);
        assert!(approx(hit.position(), DVec3::new(0.0, 0.0, -0.5)));
        assert!(approx(hit.normal(), DVec3::Z));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        assert!(intersect_sphere(&ray, &sphere).is_none());

        // Sphere entirely behind the origin
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(intersect_sphere(&ray, &sphere).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside_faces_ray() {
        let sphere = Sphere::new(DVec3::ZERO, 2.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        let hit = intersect_sphere(&ray, &sphere).unwrap();
        assert!((hit.distance() - 2.0).abs() < 1e-9);
        assert!(approx(hit.normal(), -DVec3::X));
    }

    #[test]
    fn test_triangle_hit() {
        // Triangle in XY plane at z=-1
        let tri = Triangle::new(
            DVec3::new(-1.0, -1.0, -1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(0.0, 1.0, -1.0),
        );
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        let hit = intersect_triangle(&ray, &tri).unwrap();
        assert!((hit.distance() - 1.0).abs() < 1e-9);
        assert!(approx(hit.normal(), DVec3::Z));
    }

    #[test]
    fn test_triangle_normal_faces_ray_from_behind() {
        let tri = Triangle::new(
            DVec3::new(-1.0, -1.0, -1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(0.0, 1.0, -1.0),
        );
        let ray = Ray::new(DVec3::new(0.0, 0.0, -3.0), DVec3::Z);

        let hit = intersect_triangle(&ray, &tri).unwrap();
        assert!((hit.distance() - 2.0).abs() < 1e-9);
        assert!(approx(hit.normal(), -DVec3::Z));
    }

    #[test]
    fn test_triangle_miss() {
        let tri = Triangle::new(
            DVec3::new(-1.0, -1.0, -1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(0.0, 1.0, -1.0),
        );

        // Ray pointing away
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(intersect_triangle(&ray, &tri).is_none());

        // Ray parallel to the plane
        let ray = Ray::new(DVec3::new(0.0, 0.0, -1.0), DVec3::X);
        assert!(intersect_triangle(&ray, &tri).is_none());

        // Ray passing outside the edges
        let ray = Ray::new(DVec3::new(5.0, 5.0, 0.0), -DVec3::Z);
        assert!(intersect_triangle(&ray, &tri).is_none());
    }

    #[test]
    fn test_small_triangle_is_not_parallel() {
        // Edges of 5e-4 give a determinant of 2.5e-7, below EPS
        let tri = Triangle::new(
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(5e-4, 0.0, -1.0),
            DVec3::new(0.0, 5e-4, -1.0),
        );
        let ray = Ray::new(DVec3::new(1e-4, 1e-4, 0.0), -DVec3::Z);

        let hit = intersect_triangle(&ray, &tri).unwrap();
        assert!((hit.distance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_barycentric_coords() {
        let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);

        assert!(approx(barycentric_coords(&tri, DVec3::ZERO), DVec3::X));
        assert!(approx(barycentric_coords(&tri, DVec3::X), DVec3::Y));
        assert!(approx(barycentric_coords(&tri, DVec3::Y), DVec3::Z));

        let w = barycentric_coords(&tri, DVec3::new(0.25, 0.25, 0.0));
        assert!((w.x + w.y + w.z - 1.0).abs() < 1e-9);
        assert!(approx(w, DVec3::new(0.5, 0.25, 0.25)));
    }

    #[test]
    fn test_reflect() {
        let d = DVec3::new(1.0, -1.0, 0.0);
        let r = reflect(d, DVec3::Y);
        assert!(approx(r, DVec3::new(1.0, 1.0, 0.0).normalize()));
    }

    #[test]
    fn test_refract_straight_through() {
        let r = refract(-DVec3::Z, DVec3::Z, 1.0 / 1.5).unwrap();
        assert!(approx(r, -DVec3::Z));
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        let d = DVec3::new(1.0, -1.0, 0.0);
        let r = refract(d, DVec3::Y, 1.0 / 1.5).unwrap();

        let sin_in = d.normalize().x;
        let sin_out = r.normalize().x;
        assert!((sin_out - sin_in / 1.5).abs() < 1e-9);
        assert!(r.y < 0.0);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Leaving glass at 60 degrees exceeds the ~41.8 degree critical angle
        let d = DVec3::new(60f64.to_radians().sin(), -60f64.to_radians().cos(), 0.0);
        assert!(refract(d, DVec3::Y, 1.5).is_none());
    }
}
