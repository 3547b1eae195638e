//! Per-repository resource cache
//!
//! Maps location strings to the [`Resource`] first resolved for them. The map
//! lives as long as its repository (one resolution session) and is never
//! invalidated on its own: a stale entry is the accepted price for not
//! querying the backend twice.
//!
//! Population is insert-or-get under the write lock, so when two threads miss
//! on the same location at once the first writer wins and both callers see
//! the same value.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::resource::Resource;

/// Thread-safe location -> resource map
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: RwLock<HashMap<String, Resource>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached resource for a location
    pub fn get(&self, location: &str) -> Option<Resource> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .cloned()
    }

    /// Insert `resource` unless its location is already cached, returning the
    /// value that ended up in the cache
    pub fn insert_or_get(&self, resource: Resource) -> Resource {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(resource.location().to_string())
            .or_insert(resource)
            .clone()
    }

    /// Drop a location after the backend content behind it changed
    pub fn evict(&self, location: &str) -> Option<Resource> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(location)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
