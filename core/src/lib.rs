//! # polyblur core
//!
//! CPU-side geometry for textured polygon sprites.
//!
//! - [`texture`] - Atlas regions and their UV bounds
//! - [`triangulate`] - Simple-polygon triangulation behind a pluggable trait
//! - [`mesh`] - Position/UV meshes, the vertex-count keyed cache and the builder
//! - [`sprite`] - A polygon sprite that keeps its mesh in sync with edits

pub mod math;
pub mod mesh;
pub mod sprite;
pub mod texture;
pub mod triangulate;

pub use mesh::{
    MeshBuilder, MeshCache, MeshCacheConfig, MeshTopology, PolygonMesh, PolygonVertex, build_mesh,
};
pub use sprite::PolygonSprite;
pub use texture::{TextureRegion, UvBounds, UvRemap};
pub use triangulate::{EarClipTriangulator, TriangulationError, Triangulator};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version. Call once at startup if you want it in the log.
pub fn init() {
    log::info!("polyblur core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
