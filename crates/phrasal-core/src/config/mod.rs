pub mod alignment_config;
pub mod batch_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;

pub use alignment_config::AlignmentConfig;
pub use batch_config::BatchConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{PhrasalError, PhrasalResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhrasalConfig {
    pub embedding: EmbeddingConfig,
    pub alignment: AlignmentConfig,
    pub batch: BatchConfig,
    pub observability: ObservabilityConfig,
}

impl PhrasalConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(toml_str: &str) -> PhrasalResult<Self> {
        toml::from_str(toml_str).map_err(|e| PhrasalError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Load configuration from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> PhrasalResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| PhrasalError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&raw)
    }
}
