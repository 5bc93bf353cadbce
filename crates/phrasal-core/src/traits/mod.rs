mod cache;
mod embedding;
mod unit_producer;

pub use cache::IEmbeddingCache;
pub use embedding::{IEmbeddingProvider, ISimilarityOracle};
pub use unit_producer::IUnitProducer;
