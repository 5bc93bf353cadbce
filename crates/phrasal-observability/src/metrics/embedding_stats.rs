//! Cache hit counts per tier and provider traffic.

use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of embedding engine counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingStats {
    pub l1_hits: u64,
    pub l2_hits: u64,
    pub misses: u64,
    /// Number of `embed_batch` calls made to the provider.
    pub provider_calls: u64,
    /// Number of texts sent to the provider.
    pub texts_embedded: u64,
}

impl EmbeddingStats {
    /// Total cache lookups.
    pub fn lookups(&self) -> u64 {
        self.l1_hits + self.l2_hits + self.misses
    }

    /// Combined cache hit rate across both tiers.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.lookups();
        if lookups == 0 {
            return 0.0;
        }
        (self.l1_hits + self.l2_hits) as f64 / lookups as f64
    }
}
