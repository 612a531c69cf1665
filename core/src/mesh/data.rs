//! CPU-side mesh data structures.
//!
//! This module provides:
//! - [`MeshTopology`] - How the index buffer should be interpreted
//! - [`PolygonVertex`] - Interleaved position and UV
//! - [`PolygonMesh`] - Vertex and index buffers for one polygon

/// How the index buffer of a [`PolygonMesh`] is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeshTopology {
    /// Every three indices form a triangle.
    #[default]
    TriangleList,
    /// The indices list the outline in order. Emitted when triangulation
    /// failed; renderers draw it as best they can.
    Polygon,
}

impl MeshTopology {
    /// Get the number of indices per primitive, if fixed.
    pub fn indices_per_primitive(&self) -> Option<usize> {
        match self {
            Self::TriangleList => Some(3),
            Self::Polygon => None,
        }
    }
}

/// Vertex layout shared by all polygon meshes: 2 floats position, 2 floats UV.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PolygonVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl PolygonVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}

/// A polygon mesh with interleaved vertices and `u32` indices.
///
/// Buffers are rewritten in place on rebuild, so a mesh that is rebuilt with
/// the same vertex count keeps its allocations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonMesh {
    pub(crate) vertices: Vec<PolygonVertex>,
    pub(crate) indices: Vec<u32>,
    pub(crate) topology: MeshTopology,
}

impl PolygonMesh {
    /// Create an empty mesh with room for `vertex_count` vertices and their
    /// triangle indices.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(3 * vertex_count.saturating_sub(2)),
            topology: MeshTopology::TriangleList,
        }
    }

    pub fn vertices(&self) -> &[PolygonVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn topology(&self) -> MeshTopology {
        self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Check if this mesh has an index buffer.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of triangles, zero unless the topology is a triangle list.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            MeshTopology::TriangleList => self.indices.len() / 3,
            MeshTopology::Polygon => 0,
        }
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let chunks = match self.topology {
            MeshTopology::TriangleList => self.indices.as_slice(),
            MeshTopology::Polygon => &[][..],
        };
        chunks.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Raw vertex bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Capacity of the vertex and index buffers.
    pub fn capacity(&self) -> (usize, usize) {
        (self.vertices.capacity(), self.indices.capacity())
    }

    pub(crate) fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.topology = MeshTopology::TriangleList;
    }
}
