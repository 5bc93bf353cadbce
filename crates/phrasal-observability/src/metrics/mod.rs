//! Counters for alignment outcomes and embedding cache behavior.

pub mod alignment_metrics;
pub mod embedding_stats;

pub use alignment_metrics::AlignmentMetrics;
pub use embedding_stats::EmbeddingStats;
