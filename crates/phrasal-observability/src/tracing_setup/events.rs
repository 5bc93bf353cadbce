//! Structured log events for alignment runs.
//!
//! Each function emits a `tracing` event with structured fields. The batch
//! driver wraps every sentence in a `sentence` span carrying its id, so
//! events raised inside the aligner are attributed without passing ids down.

use phrasal_core::RecoveryEvent;

/// Log a completed sentence alignment. Emitted once per sentence.
pub fn sentence_aligned(
    units: usize,
    tokens: usize,
    max_span_len: usize,
    best_score: Option<f64>,
    recoveries: usize,
) {
    tracing::info!(
        event = "sentence_aligned",
        units,
        tokens,
        max_span_len,
        best_score = ?best_score,
        recoveries,
        "sentence aligned"
    );
}

/// Log a recovery path firing during backtracking.
pub fn recovery_triggered(event: &RecoveryEvent) {
    tracing::warn!(
        event = "recovery_triggered",
        unit_index = event.unit_index,
        column = event.column,
        action = event.action.label(),
        "alignment recovery triggered"
    );
}

/// Log a sentence whose alignment failed and was replaced by the fallback.
pub fn sentence_failed(sentence_id: u64, units: usize, error: &str) {
    tracing::error!(
        event = "sentence_failed",
        sentence_id,
        units,
        error = %error,
        "sentence alignment failed, empty fallback substituted"
    );
}

/// Log a sentence skipped by the cost guard.
pub fn sentence_skipped(sentence_id: u64, cost: u64, budget: u64) {
    tracing::warn!(
        event = "sentence_skipped",
        sentence_id,
        cost,
        budget,
        "sentence over cost budget, empty fallback substituted"
    );
}
