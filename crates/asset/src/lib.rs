//! Asset loading/parsers (meshes, materials, textures) and procedural
//! primitives. CPU-only; GPU upload lives in the renderer.

use std::path::PathBuf;

use thiserror::Error;

pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod primitives;
pub mod sequence;
pub mod texture;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load material library {path:?}: {reason}")]
    Material { path: PathBuf, reason: String },
    #[error("Failed to load geometry {path:?}: {reason}")]
    Geometry { path: PathBuf, reason: String },
    #[error("Load step out of order: expected {expected}, sequence is {state}")]
    OutOfOrder {
        expected: &'static str,
        state: &'static str,
    },
}
