use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::AlignStrategy;

/// Alignment engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Backtracking strategy used when no full tiling exists.
    pub strategy: AlignStrategy,
    /// Multiplier on floor(M / N) when deriving the span limit.
    pub span_multiplier: usize,
    /// Hard cap on the span limit.
    pub max_span_cap: usize,
    /// Score the columns of each DP row on the rayon pool.
    pub parallel_scoring: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            strategy: AlignStrategy::default(),
            span_multiplier: defaults::DEFAULT_SPAN_MULTIPLIER,
            max_span_cap: defaults::DEFAULT_MAX_SPAN_CAP,
            parallel_scoring: defaults::DEFAULT_PARALLEL_SCORING,
        }
    }
}
