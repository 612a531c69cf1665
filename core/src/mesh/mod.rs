//! CPU-side polygon meshes.
//!
//! - [`PolygonVertex`] / [`PolygonMesh`] - Position + UV vertex buffer with an index buffer
//! - [`MeshCache`] - Meshes keyed by vertex count so edits reuse storage
//! - [`MeshBuilder`] - Triangulation and UV assignment for a vertex list

mod builder;
mod cache;
mod data;

pub use builder::{MeshBuilder, build_mesh};
pub use cache::{MeshCache, MeshCacheConfig};
pub use data::{MeshTopology, PolygonMesh, PolygonVertex};
