//! Textured polygon sprite.
//!
//! [`PolygonSprite`] owns a vertex list, an optional atlas region and a
//! position offset. Every setter rebuilds the mesh immediately, so
//! [`PolygonSprite::mesh`] always reflects the latest edit.

use crate::math::{Vec2, round_tenth_vec2};
use crate::mesh::{MeshBuilder, MeshCache, MeshCacheConfig, PolygonMesh};
use crate::texture::TextureRegion;

/// A sprite whose outline is an arbitrary simple polygon.
#[derive(Debug)]
pub struct PolygonSprite {
    vertices: Vec<Vec2>,
    offset: Vec2,
    anchor: Vec2,
    region: Option<TextureRegion>,
    size_hint: Vec2,
    builder: MeshBuilder,
    cache: MeshCache,
}

impl PolygonSprite {
    /// A 100x100 square with its corner at the origin and no texture.
    pub fn new() -> Self {
        Self::with_builder(MeshBuilder::new(), MeshCacheConfig::default())
    }

    pub fn with_builder(builder: MeshBuilder, cache_config: MeshCacheConfig) -> Self {
        let mut sprite = Self {
            vertices: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 100.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(100.0, 0.0),
            ],
            offset: Vec2::ZERO,
            anchor: Vec2::splat(0.5),
            region: None,
            size_hint: Vec2::ZERO,
            builder,
            cache: MeshCache::with_config(cache_config),
        };
        sprite.refresh();
        sprite
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn texture_region(&self) -> Option<&TextureRegion> {
        self.region.as_ref()
    }

    /// Replace the outline.
    pub fn set_vertices(&mut self, vertices: Vec<Vec2>) {
        self.vertices = vertices;
        self.update_size_hint();
        self.rebuild();
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.rebuild();
    }

    /// Anchor used when the outline is reset to a rectangle.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
    }

    /// Swap the atlas region.
    ///
    /// Setting the region it already has does nothing. Otherwise the outline
    /// is reset to a rectangle around the anchor: the region's untrimmed
    /// size, or the current size hint when the region is cleared.
    pub fn set_texture_region(&mut self, region: Option<TextureRegion>) {
        if self.region == region {
            return;
        }
        self.region = region;
        self.reset_vertices();
        self.refresh();
    }

    /// Insert a vertex at `index` (clamped to the end of the list).
    pub fn insert_vertex(&mut self, index: usize, position: Vec2) {
        let index = index.min(self.vertices.len());
        self.vertices.insert(index, round_tenth_vec2(position));
        self.update_size_hint();
        self.rebuild();
    }

    /// Move an existing vertex. Returns `false` if `index` is out of range.
    pub fn move_vertex(&mut self, index: usize, position: Vec2) -> bool {
        let Some(vertex) = self.vertices.get_mut(index) else {
            return false;
        };
        *vertex = round_tenth_vec2(position);
        self.update_size_hint();
        self.rebuild();
        true
    }

    /// Remove a vertex, returning it if `index` was in range.
    pub fn remove_vertex(&mut self, index: usize) -> Option<Vec2> {
        if index >= self.vertices.len() {
            return None;
        }
        let removed = self.vertices.remove(index);
        self.update_size_hint();
        self.rebuild();
        Some(removed)
    }

    /// Symmetric content size derived from the outline.
    ///
    /// Both axes use twice the largest `|x|`. Y coordinates do not
    /// contribute, so tall outlines get a square hint.
    pub fn size_hint(&self) -> Vec2 {
        self.size_hint
    }

    /// The mesh for the current outline.
    pub fn mesh(&self) -> Option<&PolygonMesh> {
        self.cache.get(self.vertices.len())
    }

    /// Whether the mesh has an index buffer to draw.
    pub fn is_renderable(&self) -> bool {
        self.vertices.len() >= 3 && self.mesh().is_some_and(PolygonMesh::is_indexed)
    }

    /// Number of vertex counts with cached meshes.
    pub fn cached_meshes(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached meshes. The next edit allocates again.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Recompute the size hint and rebuild the mesh.
    pub fn refresh(&mut self) {
        self.update_size_hint();
        self.rebuild();
    }

    fn update_size_hint(&mut self) {
        let extent = self
            .vertices
            .iter()
            .fold(0.0_f32, |acc, v| acc.max(v.x.abs()));
        self.size_hint = Vec2::splat(extent * 2.0);
    }

    fn reset_vertices(&mut self) {
        let size = match &self.region {
            Some(region) => region.original_size(),
            None => self.size_hint,
        };
        let origin = -self.anchor * size;
        self.vertices = vec![
            origin,
            Vec2::new(origin.x + size.x, origin.y),
            origin + size,
            Vec2::new(origin.x, origin.y + size.y),
        ];
        log::debug!(
            "PolygonSprite: outline reset to {}x{} rectangle",
            size.x,
            size.y
        );
    }

    fn rebuild(&mut self) {
        let mesh = self.cache.get_or_insert(self.vertices.len());
        self.builder
            .build_into(mesh, &self.vertices, self.region.as_ref(), self.offset);
    }
}

impl Default for PolygonSprite {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::UvBounds;

    #[test]
    fn test_default_square() {
        let sprite = PolygonSprite::new();
        assert_eq!(sprite.vertices().len(), 4);
        assert_eq!(sprite.size_hint(), Vec2::splat(200.0));
        assert!(sprite.is_renderable());
        assert_eq!(sprite.mesh().map(|m| m.index_count()), Some(6));
    }

    #[test]
    fn test_size_hint_ignores_y() {
        let mut sprite = PolygonSprite::new();
        sprite.set_vertices(vec![
            Vec2::new(-10.0, -300.0),
            Vec2::new(20.0, -300.0),
            Vec2::new(0.0, 300.0),
        ]);
        assert_eq!(sprite.size_hint(), Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_setting_region_resets_outline() {
        let mut sprite = PolygonSprite::new();
        let region = TextureRegion::with_uv_bounds(Vec2::new(64.0, 32.0), UvBounds::FULL, false);
        sprite.set_texture_region(Some(region));

        assert_eq!(
            sprite.vertices(),
            &[
                Vec2::new(-32.0, -16.0),
                Vec2::new(32.0, -16.0),
                Vec2::new(32.0, 16.0),
                Vec2::new(-32.0, 16.0),
            ]
        );
        let uvs: Vec<[f32; 2]> = sprite.mesh().unwrap().vertices().iter().map(|v| v.uv).collect();
        assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_same_region_is_noop() {
        let region = TextureRegion::with_uv_bounds(Vec2::splat(50.0), UvBounds::FULL, false);
        let mut sprite = PolygonSprite::new();
        sprite.set_texture_region(Some(region.clone()));
        sprite.move_vertex(0, Vec2::new(-40.0, -40.0));
        let edited = sprite.vertices().to_vec();

        sprite.set_texture_region(Some(region));
        assert_eq!(sprite.vertices(), edited.as_slice());
    }

    #[test]
    fn test_clearing_region_uses_size_hint() {
        let region = TextureRegion::with_uv_bounds(Vec2::new(20.0, 80.0), UvBounds::FULL, false);
        let mut sprite = PolygonSprite::new();
        sprite.set_texture_region(Some(region));
        // Hint is 2 * max|x| = 20 on both axes
        sprite.set_texture_region(None);
        assert_eq!(sprite.vertices()[0], Vec2::new(-10.0, -10.0));
        assert_eq!(sprite.vertices()[2], Vec2::new(10.0, 10.0));
        assert!(sprite.mesh().unwrap().vertices().iter().all(|v| v.uv == [0.0, 0.0]));
    }

    #[test]
    fn test_edits_round_to_tenth() {
        let mut sprite = PolygonSprite::new();
        sprite.insert_vertex(1, Vec2::new(-20.04, 50.06));
        assert_eq!(sprite.vertices()[1], Vec2::new(-20.0, 50.1));
        assert!(sprite.move_vertex(0, Vec2::new(1.26, 0.0)));
        assert_eq!(sprite.vertices()[0], Vec2::new(1.3, 0.0));
        assert!(!sprite.move_vertex(99, Vec2::ZERO));
    }

    #[test]
    fn test_vertex_count_changes_use_separate_meshes() {
        let mut sprite = PolygonSprite::new();
        sprite.insert_vertex(4, Vec2::new(50.0, -20.0));
        assert_eq!(sprite.cached_meshes(), 2);
        assert_eq!(sprite.mesh().unwrap().vertex_count(), 5);

        sprite.remove_vertex(4);
        assert_eq!(sprite.cached_meshes(), 2);
        assert_eq!(sprite.mesh().unwrap().vertex_count(), 4);

        sprite.clear_cache();
        assert!(sprite.mesh().is_none());
    }

    #[test]
    fn test_two_vertices_not_renderable() {
        let mut sprite = PolygonSprite::new();
        sprite.set_vertices(vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]);
        assert!(!sprite.is_renderable());
        assert_eq!(sprite.mesh().unwrap().vertex_count(), 2);
    }
}
