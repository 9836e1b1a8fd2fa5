//! High-level scene loading.
//!
//! Meshes and material libraries are read with `tobj`, triangulated on load.
//! The extension records are read by [`parse_records`] and bound to the
//! material named by the most recent `usemtl`.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info};
use prism_math::{DVec3, Sphere, Triangle};

use super::mtl::convert_material;
use super::records::{parse_records, SceneRecord};
use crate::error::{SceneError, SceneResult};
use crate::material::{Material, MaterialId};
use crate::scene::{Light, Scene, TriangleObject};

/// Name of the material used by geometry declared before any `usemtl`.
pub const DEFAULT_MATERIAL: &str = "__default";

/// Load a scene from an OBJ file.
///
/// Material libraries are resolved relative to the file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let base_dir = path.parent().map(|p| p.to_path_buf());
    load_scene_from_str(&content, name, base_dir)
}

/// Load a scene from OBJ text (useful for testing).
///
/// Without a `base_dir`, `mtllib` paths are resolved against the current
/// working directory.
pub fn load_scene_from_str(
    content: &str,
    name: &str,
    base_dir: Option<PathBuf>,
) -> SceneResult<Scene> {
    let records = parse_records(content)?;

    // Read every library up front so failures keep their path
    let mut libraries: HashMap<PathBuf, _> = HashMap::new();
    for (_, record) in &records {
        if let SceneRecord::MaterialLibrary(file) = record {
            if libraries.contains_key(Path::new(file)) {
                continue;
            }
            let (path, handle) = open_library(base_dir.as_deref(), file)?;
            let in_library = |e: SceneError| SceneError::Library {
                name: file.clone(),
                source: Box::new(e),
            };
            let library = tobj::load_mtl_buf(&mut BufReader::new(handle))
                .map_err(|e| in_library(e.into()))?;
            for material in &library.0 {
                convert_material(material).map_err(&in_library)?;
            }
            debug!("Loaded {} materials from {}", library.0.len(), path.display());
            libraries.insert(PathBuf::from(file), library);
        }
    }

    let options = tobj::LoadOptions {
        triangulate: true,
        ..Default::default()
    };
    let mut reader = content.as_bytes();
    let (models, materials) = tobj::load_obj_buf(&mut reader, &options, |file: &Path| {
        match libraries.get(file) {
            Some(library) => Ok(library.clone()),
            None => Ok(Default::default()),
        }
    })?;

    let mut builder = SceneBuilder::new(name);
    builder.add_materials(&materials?)?;
    for (line, record) in records {
        builder.process(line, record)?;
    }
    for model in &models {
        builder.add_mesh(model)?;
    }

    Ok(builder.finish())
}

fn open_library(base_dir: Option<&Path>, file: &str) -> SceneResult<(PathBuf, File)> {
    let path = match base_dir {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    };
    match File::open(&path) {
        Ok(handle) => Ok((path, handle)),
        Err(source) => Err(SceneError::Io { path, source }),
    }
}

/// Internal builder for constructing a Scene from loaded OBJ data.
struct SceneBuilder {
    scene: Scene,
    default_material: MaterialId,
    /// Scene handle for each `tobj` material index
    material_ids: Vec<MaterialId>,
    /// Material handles by name; later libraries override earlier ones
    material_map: HashMap<String, MaterialId>,
    current_material: MaterialId,
}

impl SceneBuilder {
    fn new(name: &str) -> Self {
        let mut scene = Scene::new(name);
        let default_material = scene.add_material(Material {
            name: DEFAULT_MATERIAL.to_string(),
            ..Default::default()
        });
        Self {
            scene,
            default_material,
            material_ids: Vec::new(),
            material_map: HashMap::new(),
            current_material: default_material,
        }
    }

    fn add_materials(&mut self, materials: &[tobj::Material]) -> SceneResult<()> {
        for source in materials {
            let id = self.scene.add_material(convert_material(source)?);
            self.material_ids.push(id);
            self.material_map.insert(source.name.clone(), id);
        }
        Ok(())
    }

    fn process(&mut self, line: usize, record: SceneRecord) -> SceneResult<()> {
        match record {
            SceneRecord::MaterialLibrary(_) => {}
            SceneRecord::UseMaterial(name) => {
                self.current_material = *self
                    .material_map
                    .get(&name)
                    .ok_or(SceneError::UnknownMaterial { line, name })?;
            }
            SceneRecord::Sphere { center, radius } => {
                self.scene
                    .add_sphere(Sphere::new(center, radius), self.current_material);
            }
            SceneRecord::Light {
                position,
                intensity,
            } => self.scene.add_light(Light::new(position, intensity)),
        }
        Ok(())
    }

    fn add_mesh(&mut self, model: &tobj::Model) -> SceneResult<()> {
        let mesh = &model.mesh;
        let material = mesh
            .material_id
            .and_then(|i| self.material_ids.get(i).copied())
            .unwrap_or(self.default_material);
        // Smooth shading only when every corner names a normal
        let smooth = mesh.normal_indices.len() == mesh.indices.len();

        for (face, corners) in mesh.indices.chunks_exact(3).enumerate() {
            let polygon = Triangle::new(
                vec3_at(&mesh.positions, corners[0])?,
                vec3_at(&mesh.positions, corners[1])?,
                vec3_at(&mesh.positions, corners[2])?,
            );
            let triangle = if smooth {
                let n = &mesh.normal_indices[face * 3..face * 3 + 3];
                TriangleObject::with_normals(
                    polygon,
                    material,
                    [
                        vec3_at(&mesh.normals, n[0])?,
                        vec3_at(&mesh.normals, n[1])?,
                        vec3_at(&mesh.normals, n[2])?,
                    ],
                )
            } else {
                TriangleObject::new(polygon, material)
            };
            self.scene.add_triangle(triangle);
        }

        debug!(
            "Mesh '{}': {} triangles{}",
            model.name,
            mesh.indices.len() / 3,
            if smooth { ", smooth" } else { "" }
        );
        Ok(())
    }

    fn finish(self) -> Scene {
        info!(
            "Loaded scene '{}': {} primitives ({} spheres), {} lights, {} materials",
            self.scene.name,
            self.scene.primitive_count(),
            self.scene.sphere_objects().len(),
            self.scene.lights().len(),
            self.scene.materials().len()
        );
        self.scene
    }
}

/// Read the `index`-th vector of a flat `[x, y, z, ...]` buffer.
fn vec3_at(data: &[f64], index: u32) -> SceneResult<DVec3> {
    let start = index as usize * 3;
    match data.get(start..start + 3) {
        Some(v) => Ok(DVec3::new(v[0], v[1], v[2])),
        None => Err(SceneError::IndexOutOfRange { index }),
    }
}
