//! # phrasal-observability
//!
//! Structured tracing setup, per-sentence and per-recovery events, and
//! counters for measuring how often each failure mode fires.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{AlignmentMetrics, EmbeddingStats};
pub use tracing_setup::{events, init_tracing, init_tracing_with_filter};
