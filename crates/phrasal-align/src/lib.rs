//! # phrasal-align
//!
//! Aligns a source sentence, pre-segmented into meaning units, with its
//! translation's token sequence. Each unit receives one contiguous span of
//! tokens; spans never overlap or move backward, and together they
//! maximize the summed cosine similarity reported by the oracle.
//!
//! ## Pipeline
//!
//! ```text
//! Aligner::align
//! ├── CandidateSet      every span of length 1..=L, stable ids
//! ├── ISimilarityOracle units + candidate texts → unit vectors
//! ├── dp::fill          score rows over (unit, cut), parent table kept
//! └── backtrack         strict or reconciling path recovery
//! BatchAligner          per-sentence isolation, rayon across sentences
//! ```

pub mod aligner;
pub mod backtrack;
pub mod batch;
pub mod candidates;
pub mod dp;
pub mod scratch;
pub mod similarity;
pub mod tokenize;

pub use aligner::{AlignPhase, Aligner, AlignmentOutcome};
pub use batch::{BatchAligner, BatchReport, SentenceAlignment, SentencePair, SentenceStatus};
pub use candidates::{max_span_len, CandidateSet};
pub use scratch::{DpScratch, ScratchPool};
pub use tokenize::WhitespaceTokenizer;
