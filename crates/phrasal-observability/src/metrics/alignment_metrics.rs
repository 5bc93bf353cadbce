//! Sentence outcomes, empty units, and recovery firings by action.

use std::collections::HashMap;

use phrasal_core::RecoveryEvent;
use serde::{Deserialize, Serialize};

/// Alignment failure-mode counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentMetrics {
    /// Sentences fully tiled without recovery.
    pub sentences_aligned: u64,
    /// Sentences that needed at least one recovery step.
    pub sentences_recovered: u64,
    /// Sentences where the oracle or config failed.
    pub sentences_failed: u64,
    /// Sentences skipped by the cost guard.
    pub sentences_skipped: u64,
    /// Units that ended up with an empty span.
    pub empty_units: u64,
    /// Recovery firings keyed by action label.
    pub recoveries_by_action: HashMap<String, u64>,
}

impl AlignmentMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sentence that produced an alignment (possibly recovered).
    pub fn record_alignment(&mut self, segments: &[String], recoveries: &[RecoveryEvent]) {
        if recoveries.is_empty() {
            self.sentences_aligned += 1;
        } else {
            self.sentences_recovered += 1;
        }
        self.empty_units += segments.iter().filter(|s| s.is_empty()).count() as u64;
        for event in recoveries {
            *self
                .recoveries_by_action
                .entry(event.action.label().to_string())
                .or_default() += 1;
        }
    }

    pub fn record_failure(&mut self, units: usize) {
        self.sentences_failed += 1;
        self.empty_units += units as u64;
    }

    pub fn record_skip(&mut self, units: usize) {
        self.sentences_skipped += 1;
        self.empty_units += units as u64;
    }

    /// Total sentences seen.
    pub fn total(&self) -> u64 {
        self.sentences_aligned
            + self.sentences_recovered
            + self.sentences_failed
            + self.sentences_skipped
    }

    /// Fraction of sentences that needed recovery.
    pub fn recovery_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.sentences_recovered as f64 / total as f64
        }
    }

    /// Fraction of sentences that failed outright.
    pub fn failure_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.sentences_failed as f64 / total as f64
        }
    }
}
