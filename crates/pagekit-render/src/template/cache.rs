//! Thread-safe template cache.
//!
//! Maps a logical template name to the fully merged [`TemplateSet`] built for
//! it. The cache is unbounded: entries live until [`TemplateCache::clear`] is
//! called or the process exits.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::set::TemplateSet;

/// A name to [`TemplateSet`] map guarded by a read-write lock.
///
/// Readers never block each other. A poisoned lock is recovered rather than
/// propagated, since entries are replaced whole and never observed half
/// written.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<String, TemplateSet>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the cached set for `name`.
    ///
    /// The clone shares its compiled environment with the cached entry.
    pub fn get(&self, name: &str) -> Option<TemplateSet> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(name).cloned()
    }

    /// Stores `set` under `name`, replacing any previous entry.
    pub fn insert(&self, name: impl Into<String>, set: TemplateSet) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.into(), set);
    }

    pub fn contains(&self, name: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(name)
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

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_cache_get_returns_shared_set() {
        let cache = TemplateCache::new();
        let set = TemplateSet::parse("a", "a").unwrap();
        cache.insert("a", set.clone());

        let hit = cache.get("a").unwrap();
        assert!(TemplateSet::ptr_eq(&hit, &set));
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_cache_clear() {
        let cache = TemplateCache::new();
        cache.insert("a", TemplateSet::parse("a", "a").unwrap());
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("a"));

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains("a"));
    }

    #[test]
    fn test_cache_concurrent_inserts() {
        let cache = Arc::new(TemplateCache::new());
        std::thread::scope(|s| {
            for i in 0..8 {
                let cache = Arc::clone(&cache);
                s.spawn(move || {
                    let name = format!("t{}", i);
                    cache.insert(name.clone(), TemplateSet::parse(&name, "x").unwrap());
                    assert!(cache.get(&name).is_some());
                });
            }
        });
        assert_eq!(cache.len(), 8);
    }
}
