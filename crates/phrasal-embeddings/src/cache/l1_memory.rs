//! L1 in-memory cache using moka.
//!
//! Keyed by exact text. No TTL. Unbounded unless a capacity is given; a
//! bounded cache may evict texts, which are then embedded again on reuse.

use moka::sync::Cache;

/// L1 in-memory embedding cache.
pub struct L1MemoryCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1MemoryCache {
    /// Create a new L1 cache. `None` keeps every entry for the process.
    pub fn new(max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder();
        if let Some(max) = max_entries {
            builder = builder.max_capacity(max);
        }
        Self {
            cache: builder.build(),
        }
    }

    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.cache.get(text)
    }

    pub fn insert(&self, text: String, embedding: Vec<f32>) {
        self.cache.insert(text, embedding);
    }

    /// Number of entries currently in the cache.
    ///
    /// moka applies writes lazily, so this may lag recent inserts.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
