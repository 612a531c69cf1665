//! Meshes keyed by vertex count.

use std::collections::HashMap;

use super::data::PolygonMesh;

/// Configuration for a [`MeshCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshCacheConfig {
    /// Upper bound on cached meshes. `None` keeps every vertex count seen.
    pub max_entries: Option<usize>,
}

impl MeshCacheConfig {
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }
}

/// Mesh storage keyed by vertex count.
///
/// Editing a polygon without adding or removing vertices hands back the
/// same buffers, so rebuilding does not reallocate. A new vertex count gets
/// a new entry. With [`MeshCacheConfig::max_entries`] set, the least
/// recently used entry is dropped once the bound is exceeded.
#[derive(Debug, Default)]
pub struct MeshCache {
    config: MeshCacheConfig,
    entries: HashMap<usize, PolygonMesh>,
    /// Keys, least recently used first.
    recency: Vec<usize>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MeshCacheConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> MeshCacheConfig {
        self.config
    }

    /// Get the mesh for `vertex_count`, allocating it on first use.
    pub fn get_or_insert(&mut self, vertex_count: usize) -> &mut PolygonMesh {
        self.touch(vertex_count);
        if !self.entries.contains_key(&vertex_count) {
            self.make_room();
        }
        self.entries.entry(vertex_count).or_insert_with(|| {
            log::debug!("MeshCache: allocating mesh for {} vertices", vertex_count);
            PolygonMesh::with_capacity(vertex_count)
        })
    }

    pub fn get(&self, vertex_count: usize) -> Option<&PolygonMesh> {
        self.entries.get(&vertex_count)
    }

    pub fn contains(&self, vertex_count: usize) -> bool {
        self.entries.contains_key(&vertex_count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the mesh for one vertex count.
    pub fn evict(&mut self, vertex_count: usize) -> Option<PolygonMesh> {
        self.recency.retain(|&k| k != vertex_count);
        self.entries.remove(&vertex_count)
    }

    /// Drop every cached mesh.
    pub fn clear(&mut self) {
        log::debug!("MeshCache: clearing {} meshes", self.entries.len());
        self.entries.clear();
        self.recency.clear();
    }

    fn touch(&mut self, vertex_count: usize) {
        self.recency.retain(|&k| k != vertex_count);
        self.recency.push(vertex_count);
    }

    /// Evict least recently used entries until one more fits. The key
    /// touched last is never evicted.
    fn make_room(&mut self) {
        let Some(max) = self.config.max_entries else {
            return;
        };
        while self.entries.len() >= max && self.recency.len() > 1 {
            let oldest = self.recency.remove(0);
            self.entries.remove(&oldest);
            log::debug!("MeshCache: evicted mesh for {} vertices", oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_count_returns_same_storage() {
        let mut cache = MeshCache::new();
        let first = cache.get_or_insert(4).vertices.as_ptr();
        let second = cache.get_or_insert(4).vertices.as_ptr();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_new_count_adds_entry() {
        let mut cache = MeshCache::new();
        cache.get_or_insert(3);
        cache.get_or_insert(4);
        cache.get_or_insert(5);
        assert_eq!(cache.len(), 3);
        assert!(cache.contains(3));
    }

    #[test]
    fn test_bounded_cache_evicts_least_recent() {
        let mut cache = MeshCache::with_config(MeshCacheConfig::default().with_max_entries(2));
        cache.get_or_insert(3);
        cache.get_or_insert(4);
        cache.get_or_insert(3);
        cache.get_or_insert(5);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(3));
        assert!(!cache.contains(4));
        assert!(cache.contains(5));
    }

    #[test]
    fn test_single_entry_bound_keeps_newest() {
        let mut cache = MeshCache::with_config(MeshCacheConfig::default().with_max_entries(1));
        cache.get_or_insert(3).vertices.reserve(64);
        let capacity = cache.get_or_insert(3).capacity().0;
        assert!(capacity >= 64);

        cache.get_or_insert(7);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(7));
        assert!(!cache.contains(3));

        // A hit on a full cache evicts nothing
        cache.get_or_insert(7);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evict_and_clear() {
        let mut cache = MeshCache::new();
        cache.get_or_insert(3);
        cache.get_or_insert(6);

        assert!(cache.evict(3).is_some());
        assert!(cache.evict(3).is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
