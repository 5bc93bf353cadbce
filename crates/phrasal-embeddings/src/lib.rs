//! # phrasal-embeddings
//!
//! The similarity oracle: text in, embedding vectors out, memoized by
//! exact text across alignment calls.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine (ISimilarityOracle)
//! ├── IEmbeddingProvider
//! │   ├── HashedNgramProvider (offline, deterministic)
//! │   └── ApiProvider (OpenAI-compatible /embeddings endpoint)
//! └── CacheCoordinator (IEmbeddingCache)
//!     ├── L1 Memory (moka, keyed by text)
//!     └── L2 SQLite (optional, persistent, keyed by blake3)
//! ```

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::{CacheCoordinator, CacheHitTier};
pub use engine::EmbeddingEngine;
pub use providers::{ApiProvider, HashedNgramProvider};
