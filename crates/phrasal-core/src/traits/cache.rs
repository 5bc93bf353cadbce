/// Text-keyed embedding cache shared across alignment calls.
///
/// Implementations must be safe to share between worker threads. Writes
/// are add-only; a concurrent duplicate `put` of the same text is harmless.
pub trait IEmbeddingCache: Send + Sync {
    fn get(&self, text: &str) -> Option<Vec<f32>>;

    fn put(&self, text: &str, embedding: &[f32]);
}
