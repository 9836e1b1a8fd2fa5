//! Prism Core - scene model and scene description loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Material`, `Light`, sphere and triangle objects
//! - **OBJ/MTL support**: parsing and loading the extended OBJ scene format
//!
//! # Example
//!
//! ```ignore
//! use prism_core::obj::load_scene;
//!
//! let scene = load_scene("scene.obj")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.lights().len());
//! ```

pub mod error;
pub mod material;
pub mod obj;
pub mod scene;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use material::{Material, MaterialId};
pub use obj::{load_scene, load_scene_from_str};
pub use scene::{Light, PrimitiveRef, Scene, SphereObject, TriangleObject};
