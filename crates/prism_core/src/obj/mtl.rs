//! MTL material libraries.
//!
//! `tobj` parses the standard keys. Emission (`Ke`) and the albedo weights
//! (`al`) are not part of its material model and arrive as unknown
//! parameters.

use log::debug;
use prism_math::DVec3;

use crate::error::{SceneError, SceneResult};
use crate::material::Material;

fn to_dvec3(v: [f64; 3]) -> DVec3 {
    DVec3::from_array(v)
}

/// Parse a three-component value stored verbatim by `tobj`.
fn parse_param(material: &tobj::Material, key: &str) -> SceneResult<Option<DVec3>> {
    let Some(value) = material.unknown_param.get(key) else {
        return Ok(None);
    };
    let invalid = || SceneError::InvalidParameter {
        material: material.name.clone(),
        key: key.to_string(),
        value: value.clone(),
    };

    let parts = value
        .split_whitespace()
        .map(|t| t.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;
    match parts.as_slice() {
        [x, y, z] => Ok(Some(DVec3::new(*x, *y, *z))),
        _ => Err(invalid()),
    }
}

/// Convert a `tobj` material, keeping defaults for keys it does not set.
pub fn convert_material(source: &tobj::Material) -> SceneResult<Material> {
    let mut material = Material {
        name: source.name.clone(),
        ..Default::default()
    };

    if let Some(kd) = source.diffuse {
        material.diffuse_color = to_dvec3(kd);
    }
    if let Some(ks) = source.specular {
        material.specular_color = to_dvec3(ks);
    }
    if let Some(ka) = source.ambient {
        material.ambient_color = to_dvec3(ka);
    }
    if let Some(ns) = source.shininess {
        material.specular_exponent = ns;
    }
    if let Some(ni) = source.optical_density {
        material.refraction_index = ni;
    }
    if let Some(ke) = parse_param(source, "Ke")? {
        material.intensity = ke;
    }
    if let Some(al) = parse_param(source, "al")? {
        material.albedo = al;
    }

    for key in source.unknown_param.keys() {
        if key != "Ke" && key != "al" {
            debug!("Ignoring MTL key '{}' in material '{}'", key, source.name);
        }
    }

    Ok(material)
}

/// Parse an MTL library into its materials, in declaration order.
pub fn parse_mtl(content: &str) -> SceneResult<Vec<Material>> {
    let mut reader = content.as_bytes();
    let (materials, _) = tobj::load_mtl_buf(&mut reader)?;
    materials.iter().map(convert_material).collect()
}
