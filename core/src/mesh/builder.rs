//! Polygon to mesh conversion.

use crate::math::{Vec2, lerp};
use crate::texture::TextureRegion;
use crate::triangulate::{EarClipTriangulator, Triangulator};

use super::data::{MeshTopology, PolygonMesh, PolygonVertex};

/// Builds textured meshes from polygon outlines.
///
/// # Example
///
/// ```
/// use polyblur_core::{build_mesh, math::Vec2};
///
/// let square = [
///     Vec2::new(0.0, 0.0),
///     Vec2::new(0.0, 100.0),
///     Vec2::new(100.0, 100.0),
///     Vec2::new(100.0, 0.0),
/// ];
/// let mesh = build_mesh(&square, None, Vec2::ZERO);
/// assert_eq!(mesh.index_count(), 6);
/// ```
pub struct MeshBuilder {
    triangulator: Box<dyn Triangulator>,
}

impl MeshBuilder {
    /// Builder backed by [`EarClipTriangulator`].
    pub fn new() -> Self {
        Self::with_triangulator(EarClipTriangulator)
    }

    pub fn with_triangulator(triangulator: impl Triangulator + 'static) -> Self {
        Self {
            triangulator: Box::new(triangulator),
        }
    }

    pub fn triangulator_name(&self) -> &'static str {
        self.triangulator.name()
    }

    /// Rebuild `mesh` in place from `vertices`.
    ///
    /// Fewer than three vertices leave the index buffer empty. A contour the
    /// triangulator rejects is logged and replaced by the outline index list
    /// `0..n` with [`MeshTopology::Polygon`]. Without a region every UV is
    /// `(0, 0)`.
    pub fn build_into(
        &self,
        mesh: &mut PolygonMesh,
        vertices: &[Vec2],
        region: Option<&TextureRegion>,
        offset: Vec2,
    ) {
        mesh.reset();
        mesh.vertices.extend(vertices.iter().map(|v| PolygonVertex {
            position: v.to_array(),
            uv: [0.0, 0.0],
        }));

        if let Some(region) = region {
            assign_uvs(mesh, region, offset);
        }

        let n = vertices.len();
        if n < 3 {
            return;
        }

        match self.triangulator.triangulate(vertices) {
            Ok(triangles) if !triangles.is_empty() => {
                mesh.indices.extend(triangles.iter().flatten());
            }
            Ok(_) => {
                log::warn!(
                    "{} returned no triangles for {} vertices, using outline indices",
                    self.triangulator.name(),
                    n
                );
                fill_outline(mesh, n);
            }
            Err(err) => {
                log::error!(
                    "{} failed on {} vertices: {}",
                    self.triangulator.name(),
                    n,
                    err
                );
                log::warn!("Falling back to outline indices for {} vertices", n);
                fill_outline(mesh, n);
            }
        }
    }

    /// Build a fresh mesh from `vertices`.
    pub fn build(
        &self,
        vertices: &[Vec2],
        region: Option<&TextureRegion>,
        offset: Vec2,
    ) -> PolygonMesh {
        let mut mesh = PolygonMesh::with_capacity(vertices.len());
        self.build_into(&mut mesh, vertices, region, offset);
        mesh
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MeshBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshBuilder")
            .field("triangulator", &self.triangulator.name())
            .finish()
    }
}

/// Build a mesh with the default ear-clipping triangulator.
pub fn build_mesh(vertices: &[Vec2], region: Option<&TextureRegion>, offset: Vec2) -> PolygonMesh {
    MeshBuilder::new().build(vertices, region, offset)
}

fn fill_outline(mesh: &mut PolygonMesh, n: usize) {
    mesh.indices.clear();
    mesh.indices.extend(0..n as u32);
    mesh.topology = MeshTopology::Polygon;
}

/// Position of `value` along a span of `size` centred on the origin.
fn ratio(value: f32, size: f32) -> f32 {
    if size == 0.0 {
        0.0
    } else {
        (value + size * 0.5) / size
    }
}

fn assign_uvs(mesh: &mut PolygonMesh, region: &TextureRegion, offset: Vec2) {
    let bounds = region.uv_bounds();
    let size = region.original_size();
    let rotated = region.is_rotated();

    for vertex in &mut mesh.vertices {
        let [x, y] = vertex.position;
        let u = lerp(bounds.left, bounds.right, ratio(x + offset.x, size.x));
        let v = lerp(bounds.bottom, bounds.top, ratio(y - offset.y, size.y));
        vertex.uv = if rotated { [v, u] } else { [u, v] };
    }
}
