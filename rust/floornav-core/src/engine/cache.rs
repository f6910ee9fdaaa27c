//! Recently computed routes, keyed by endpoints and floor.
//!
//! With the default capacity of one this is a single slot: every stored route
//! replaces the previous one.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::graph::WaypointId;
use crate::models::Route;

/// `floor` is `None` for unfiltered routes (used for route length).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub from: WaypointId,
    pub to: WaypointId,
    pub floor: Option<i32>,
}

impl RouteKey {
    pub fn new(from: WaypointId, to: WaypointId, floor: Option<i32>) -> Self {
        Self { from, to, floor }
    }
}

pub struct PathCache {
    capacity: usize,
    inner: LruCache<RouteKey, Arc<Route>>,
}

impl PathCache {
    pub fn with_capacity(capacity: usize) -> Self {
        let cap_nz = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self { capacity: cap_nz.get(), inner: LruCache::new(cap_nz) }
    }

    pub fn get(&mut self, key: &RouteKey) -> Option<Arc<Route>> {
        self.inner.get(key).cloned()
    }

    pub fn put(&mut self, key: RouteKey, route: Arc<Route>) {
        self.inner.put(key, route);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    pub fn capacity(&self) -> usize { self.capacity }
}

impl Default for PathCache {
    fn default() -> Self { Self::with_capacity(crate::options::DEFAULT_CACHE_CAPACITY) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(from: WaypointId, to: WaypointId) -> Arc<Route> {
        Arc::new(Route { from, to, floor: Some(1), waypoints: vec![from, to], segments: vec![], length: 0.0, expanded: 0 })
    }

    #[test]
    fn single_slot_replaces() {
        let mut cache = PathCache::default();
        let a = RouteKey::new(0, 1, Some(1));
        let b = RouteKey::new(0, 2, Some(1));
        cache.put(a, route(0, 1));
        assert!(cache.get(&a).is_some());
        cache.put(b, route(0, 2));
        assert!(cache.get(&a).is_none());
        assert_eq!(cache.get(&b).map(|r| r.to), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn floor_is_part_of_key() {
        let mut cache = PathCache::with_capacity(4);
        cache.put(RouteKey::new(0, 1, Some(1)), route(0, 1));
        assert!(cache.get(&RouteKey::new(0, 1, Some(2))).is_none());
        assert!(cache.get(&RouteKey::new(0, 1, None)).is_none());
        assert!(cache.get(&RouteKey::new(0, 1, Some(1))).is_some());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let cache = PathCache::with_capacity(0);
        assert_eq!(cache.capacity(), 1);
        assert!(cache.is_empty());
    }
}
