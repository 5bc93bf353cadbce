// Single source of truth for all default values.

use crate::constants;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashed";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384; // paraphrase-multilingual-MiniLM-L12-v2
pub const DEFAULT_EMBEDDING_MODEL: &str = "paraphrase-multilingual-MiniLM-L12-v2";
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "http://127.0.0.1:8080/v1/embeddings";
pub const DEFAULT_API_KEY_ENV: &str = "PHRASAL_EMBEDDING_API_KEY";
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 128;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// --- Alignment ---
pub const DEFAULT_SPAN_MULTIPLIER: usize = constants::SPAN_RATIO_MULTIPLIER;
pub const DEFAULT_MAX_SPAN_CAP: usize = constants::MAX_SPAN_CAP;
pub const DEFAULT_PARALLEL_SCORING: bool = false;

// --- Batch ---
pub const DEFAULT_BATCH_PARALLEL: bool = true;
pub const DEFAULT_MAX_SENTENCE_COST: u64 = 50_000_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
