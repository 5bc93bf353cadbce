mod alignment_error;
mod embedding_error;

pub use alignment_error::AlignmentError;
pub use embedding_error::EmbeddingError;

/// Crate-wide result alias.
pub type PhrasalResult<T> = Result<T, PhrasalError>;

/// Top-level error for every phrasal subsystem.
///
/// Infeasible tilings are not represented here; the backtracker always
/// recovers from them.
#[derive(Debug, thiserror::Error)]
pub enum PhrasalError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("alignment error: {0}")]
    AlignmentError(#[from] AlignmentError),

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PhrasalError {
    /// Whether this error came from the similarity oracle.
    pub fn is_oracle_failure(&self) -> bool {
        matches!(self, Self::EmbeddingError(_))
    }
}
