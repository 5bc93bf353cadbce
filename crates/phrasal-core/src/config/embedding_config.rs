use serde::{Deserialize, Serialize};

use super::defaults;

/// Similarity oracle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "hashed" or "api".
    pub provider: String,
    /// Embeddings endpoint for the "api" provider.
    pub endpoint: String,
    /// Model name sent to the endpoint.
    pub model: String,
    /// Environment variable holding the bearer token, if the endpoint needs one.
    pub api_key_env: String,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// Max texts per provider call.
    pub batch_size: usize,
    /// L1 in-memory cache max entries. `None` never evicts, so no text is
    /// embedded twice in a process.
    pub l1_cache_size: Option<u64>,
    /// SQLite file for the persistent L2 cache. `None` disables L2.
    pub l2_cache_path: Option<String>,
    /// HTTP timeout for the "api" provider.
    pub request_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            l1_cache_size: None,
            l2_cache_path: None,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
