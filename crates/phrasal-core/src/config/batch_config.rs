use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Align sentence pairs on the rayon pool.
    pub parallel: bool,
    /// Sentences whose N·M·L exceeds this are skipped with the empty fallback.
    /// Zero disables the guard.
    pub max_sentence_cost: u64,
    /// Worker threads for a dedicated pool. `None` uses the global pool.
    pub threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: defaults::DEFAULT_BATCH_PARALLEL,
            max_sentence_cost: defaults::DEFAULT_MAX_SENTENCE_COST,
            threads: None,
        }
    }
}
