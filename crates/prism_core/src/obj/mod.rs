//! Wavefront OBJ/MTL scene description support.
//!
//! Scenes are plain OBJ files extended with two records:
//!
//! - `S x y z r`: a sphere using the current material
//! - `P x y z r g b`: a point light with intensity `(r, g, b)`
//!
//! Materials come from MTL libraries named by `mtllib`, resolved relative to
//! the OBJ file. Besides the usual `Kd`/`Ks`/`Ka`/`Ke`/`Ns`/`Ni` keys, a
//! material may carry `al a b c`: the weights of direct lighting, reflection
//! and refraction.
//!
//! # Example
//!
//! ```ignore
//! use prism_core::obj::load_scene;
//!
//! let scene = load_scene("scenes/box/cube.obj")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.lights().len());
//! ```

mod loader;
mod mtl;
mod records;

pub use loader::{load_scene, load_scene_from_str, DEFAULT_MATERIAL};
pub use mtl::{convert_material, parse_mtl};
pub use records::{parse_records, SceneRecord};
