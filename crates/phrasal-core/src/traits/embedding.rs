use crate::errors::PhrasalResult;

/// Raw embedding backend.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a batch of texts. Must return exactly one vector per input.
    fn embed_batch(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}

/// The similarity oracle consumed by the aligner.
///
/// `embed` returns vectors in input order, one per text, and is a pure
/// function of the text. Vectors need not be normalized.
pub trait ISimilarityOracle: Send + Sync {
    fn embed(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>>;

    /// Fixed dimensionality of every returned vector.
    fn dimensions(&self) -> usize;
}
