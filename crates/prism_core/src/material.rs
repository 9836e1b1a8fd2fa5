//! Phong-style material definition used by the Whitted tracer.

use prism_math::DVec3;

/// Stable handle to a material stored in a [`Scene`](crate::Scene).
///
/// Handles are only meaningful for the scene that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

/// Surface material, as described by an MTL `newmtl` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (from `newmtl`)
    pub name: String,

    /// Diffuse color (`Kd`)
    pub diffuse_color: DVec3,

    /// Specular color (`Ks`)
    pub specular_color: DVec3,

    /// Ambient color (`Ka`)
    pub ambient_color: DVec3,

    /// Emitted intensity (`Ke`)
    pub intensity: DVec3,

    /// Phong specular exponent (`Ns`)
    pub specular_exponent: f64,

    /// Index of refraction relative to vacuum (`Ni`)
    pub refraction_index: f64,

    /// Weights of direct lighting, reflection and refraction (`al`)
    pub albedo: DVec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse_color: DVec3::ZERO,
            specular_color: DVec3::ZERO,
            ambient_color: DVec3::ZERO,
            intensity: DVec3::ZERO,
            specular_exponent: 1.0,
            refraction_index: 1.0,
            albedo: DVec3::new(1.0, 0.0, 0.0),
        }
    }
}

impl Material {
    /// Create a new material with just a name and diffuse color.
    pub fn new(name: impl Into<String>, diffuse_color: DVec3) -> Self {
        Self {
            name: name.into(),
            diffuse_color,
            ..Default::default()
        }
    }

    /// Weight applied to the diffuse + specular term.
    pub fn direct_weight(&self) -> f64 {
        self.albedo.x
    }

    /// Weight applied to the mirror reflection term.
    pub fn reflection_weight(&self) -> f64 {
        self.albedo.y
    }

    /// Weight applied to the refraction term.
    pub fn refraction_weight(&self) -> f64 {
        self.albedo.z
    }
}
