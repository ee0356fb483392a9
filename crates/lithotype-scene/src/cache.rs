//! Long-lived caches shared by every reflow.
//!
//! Both caches grow monotonically: a master mesh is kept for as long as the
//! cache lives, and a released instance waits in its identity's free list
//! until a later reflow needs one.

use std::sync::Arc;

use lithotype_core::alloc::HashMap;
use lithotype_geometry::{Mesh3D, ShapeId};

/// Template meshes keyed by shape identity.
#[derive(Debug, Default)]
pub struct MasterMeshCache {
    masters: HashMap<ShapeId, Arc<Mesh3D>>,
    pub hits: u64,
    pub misses: u64,
}

impl MasterMeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached master for `id`, or build and insert one.
    ///
    /// The second value is true when `build` ran.
    pub fn get_or_build<F>(&mut self, id: &ShapeId, build: F) -> (Arc<Mesh3D>, bool)
    where
        F: FnOnce() -> Mesh3D,
    {
        if let Some(mesh) = self.masters.get(id) {
            self.hits += 1;
            return (Arc::clone(mesh), false);
        }

        self.misses += 1;
        let mesh = Arc::new(build());
        self.masters.insert(id.clone(), Arc::clone(&mesh));
        (mesh, true)
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Arc<Mesh3D>> {
        self.masters.get(id)
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.masters.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.masters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masters.is_empty()
    }

    /// Hit rate in `[0, 1]`.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Detached instances waiting for reuse, one free list per identity.
#[derive(Debug)]
pub struct InstancePool<I> {
    free: HashMap<ShapeId, Vec<I>>,
}

impl<I> Default for InstancePool<I> {
    fn default() -> Self {
        Self {
            free: HashMap::new(),
        }
    }
}

impl<I> InstancePool<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ShapeId, instance: I) {
        self.free.entry(id).or_default().push(instance);
    }

    pub fn pop(&mut self, id: &ShapeId) -> Option<I> {
        self.free.get_mut(id).and_then(Vec::pop)
    }

    /// Free instances for `id`.
    pub fn available(&self, id: &ShapeId) -> usize {
        self.free.get(id).map_or(0, Vec::len)
    }

    /// Free instances across every identity.
    pub fn len(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_built_once() {
        let mut cache = MasterMeshCache::new();
        let id = ShapeId::from("f-1/0");

        let (first, built) = cache.get_or_build(&id, Mesh3D::new);
        assert!(built);
        let (second, built) = cache.get_or_build(&id, || panic!("rebuilt a cached master"));
        assert!(!built);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hit_rate(), 0.5);
    }

    #[test]
    fn test_pool_is_per_identity() {
        let mut pool = InstancePool::new();
        let a = ShapeId::from("a");
        let b = ShapeId::from("b");

        pool.push(a.clone(), 1);
        pool.push(a.clone(), 2);
        pool.push(b.clone(), 3);

        assert_eq!(pool.len(), 3);
        assert_eq!(pool.available(&a), 2);
        assert_eq!(pool.pop(&a), Some(2));
        assert_eq!(pool.pop(&b), Some(3));
        assert_eq!(pool.pop(&b), None);
        assert_eq!(pool.pop(&ShapeId::from("c")), None);
        assert!(!pool.is_empty());
    }
}
