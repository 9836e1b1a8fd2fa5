//! Scene representation consumed by the renderer.
//!
//! A scene owns every primitive, material and light for the whole render.
//! Objects refer to their material through a [`MaterialId`] into the scene's
//! material arena, so nothing inside a scene borrows from anything else.

use prism_math::{DVec3, Sphere, Triangle};

use crate::material::{Material, MaterialId};

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: DVec3,
    pub intensity: DVec3,
}

impl Light {
    pub fn new(position: DVec3, intensity: DVec3) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// A sphere with its material.
#[derive(Clone, Copy, Debug)]
pub struct SphereObject {
    pub sphere: Sphere,
    pub material: MaterialId,
}

/// A triangle with its material and optional per-vertex normals.
#[derive(Clone, Copy, Debug)]
pub struct TriangleObject {
    pub polygon: Triangle,
    pub material: MaterialId,
    normals: Option<[DVec3; 3]>,
}

impl TriangleObject {
    /// Create a flat-shaded triangle.
    pub fn new(polygon: Triangle, material: MaterialId) -> Self {
        Self {
            polygon,
            material,
            normals: None,
        }
    }

    /// Create a triangle with vertex normals for smooth shading.
    pub fn with_normals(polygon: Triangle, material: MaterialId, normals: [DVec3; 3]) -> Self {
        Self {
            polygon,
            material,
            normals: Some(normals),
        }
    }

    pub fn normals(&self) -> Option<&[DVec3; 3]> {
        self.normals.as_ref()
    }
}

/// Identifies the primitive a ray hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveRef {
    Sphere(usize),
    Triangle(usize),
}

/// The complete, read-only scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually the file stem)
    pub name: String,

    materials: Vec<Material>,
    spheres: Vec<SphereObject>,
    triangles: Vec<TriangleObject>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material and return its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        id
    }

    /// Add a sphere using an existing material.
    pub fn add_sphere(&mut self, sphere: Sphere, material: MaterialId) {
        self.spheres.push(SphereObject { sphere, material });
    }

    pub fn add_triangle(&mut self, triangle: TriangleObject) {
        self.triangles.push(triangle);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Get a material by handle.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn sphere_objects(&self) -> &[SphereObject] {
        &self.spheres
    }

    pub fn triangle_objects(&self) -> &[TriangleObject] {
        &self.triangles
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Total number of primitives (spheres and triangles).
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.triangles.len()
    }
}
