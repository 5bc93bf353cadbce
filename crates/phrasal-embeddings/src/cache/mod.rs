//! 2-tier embedding cache coordinator.
//!
//! L1 (moka in-memory) → L2 (SQLite persistent, optional).
//! Write-through: on miss, the engine embeds and writes to L1 + L2.

pub mod l1_memory;
pub mod l2_sqlite;

pub use l1_memory::L1MemoryCache;
pub use l2_sqlite::L2SqliteCache;

use phrasal_core::traits::IEmbeddingCache;
use tracing::trace;

/// Orchestrates lookups across both cache tiers.
pub struct CacheCoordinator {
    pub l1: L1MemoryCache,
    pub l2: Option<L2SqliteCache>,
}

/// Result of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHitTier {
    L1,
    L2,
    Miss,
}

impl CacheCoordinator {
    /// Memory-only coordinator.
    pub fn new(l1_capacity: Option<u64>) -> Self {
        Self {
            l1: L1MemoryCache::new(l1_capacity),
            l2: None,
        }
    }

    /// Coordinator backed by a persistent L2 cache.
    pub fn with_l2(l1_capacity: Option<u64>, l2: L2SqliteCache) -> Self {
        Self {
            l1: L1MemoryCache::new(l1_capacity),
            l2: Some(l2),
        }
    }

    /// Look up an embedding by exact text across both tiers.
    ///
    /// On L2 hit, promotes to L1 for faster subsequent access.
    pub fn lookup(&self, text: &str) -> (Option<Vec<f32>>, CacheHitTier) {
        if let Some(vec) = self.l1.get(text) {
            trace!(tier = "L1", "cache hit");
            return (Some(vec), CacheHitTier::L1);
        }

        if let Some(vec) = self.l2.as_ref().and_then(|l2| l2.get(text)) {
            trace!(tier = "L2", "cache hit");
            self.l1.insert(text.to_string(), vec.clone());
            return (Some(vec), CacheHitTier::L2);
        }

        (None, CacheHitTier::Miss)
    }
}

impl IEmbeddingCache for CacheCoordinator {
    fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.lookup(text).0
    }

    fn put(&self, text: &str, embedding: &[f32]) {
        self.l1.insert(text.to_string(), embedding.to_vec());
        if let Some(l2) = &self.l2 {
            l2.insert(text, embedding);
        }
    }
}
