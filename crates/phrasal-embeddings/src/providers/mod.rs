//! Provider registry.
//!
//! - `hashed`: character n-gram feature hashing, offline and deterministic.
//! - `api`: an OpenAI-compatible embeddings endpoint serving the
//!   sentence-transformer model.

pub mod api_provider;
pub mod hashed_ngram;

pub use api_provider::ApiProvider;
pub use hashed_ngram::HashedNgramProvider;

use phrasal_core::config::EmbeddingConfig;
use phrasal_core::errors::{PhrasalError, PhrasalResult};
use phrasal_core::traits::IEmbeddingProvider;
use tracing::info;

/// Create the configured provider.
///
/// Unknown provider names are a config error. There is no silent fallback:
/// mixing vectors from two models in one cache would corrupt similarities.
pub fn create_provider(config: &EmbeddingConfig) -> PhrasalResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "hashed" => {
            info!(provider = "hashed", dims = config.dimensions, "embedding provider ready");
            Ok(Box::new(HashedNgramProvider::new(config.dimensions)))
        }
        "api" => {
            let api_key = std::env::var(&config.api_key_env).ok();
            info!(
                provider = "api",
                endpoint = %config.endpoint,
                model = %config.model,
                authenticated = api_key.is_some(),
                "embedding provider ready"
            );
            Ok(Box::new(ApiProvider::new(
                config.endpoint.clone(),
                config.model.clone(),
                api_key,
                config.dimensions,
                config.request_timeout_secs,
            )?))
        }
        other => Err(PhrasalError::ConfigError {
            reason: format!("unknown embedding provider: {other}"),
        }),
    }
}
