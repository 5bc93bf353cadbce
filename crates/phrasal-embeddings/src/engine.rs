//! EmbeddingEngine: the similarity oracle handed to the aligner.
//!
//! Coordinates the provider and the cache tiers. Every text is embedded at
//! most once per process: cache hits are served directly, misses are
//! deduplicated within the call, embedded in `batch_size` chunks, validated
//! and written through to the cache.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use phrasal_core::config::EmbeddingConfig;
use phrasal_core::errors::{EmbeddingError, PhrasalResult};
use phrasal_core::traits::{IEmbeddingCache, IEmbeddingProvider, ISimilarityOracle};
use phrasal_observability::EmbeddingStats;
use tracing::{debug, info, warn};

use crate::cache::{CacheCoordinator, CacheHitTier, L2SqliteCache};
use crate::providers;

#[derive(Default)]
struct Counters {
    l1_hits: AtomicU64,
    l2_hits: AtomicU64,
    misses: AtomicU64,
    provider_calls: AtomicU64,
    texts_embedded: AtomicU64,
}

/// Memoizing embedding engine. Safe to share across worker threads.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: CacheCoordinator,
    batch_size: usize,
    counters: Counters,
}

impl EmbeddingEngine {
    /// Create an engine from configuration.
    pub fn new(config: &EmbeddingConfig) -> PhrasalResult<Self> {
        let provider = providers::create_provider(config)?;
        Self::with_provider(provider, config)
    }

    /// Create an engine around an explicit provider. Cache settings and
    /// batch size still come from `config`.
    pub fn with_provider(
        provider: Box<dyn IEmbeddingProvider>,
        config: &EmbeddingConfig,
    ) -> PhrasalResult<Self> {
        let cache = match &config.l2_cache_path {
            Some(path) => {
                let namespace = format!("{}:{}", provider.name(), provider.dimensions());
                let l2 = L2SqliteCache::open(Path::new(path), &namespace)?;
                CacheCoordinator::with_l2(config.l1_cache_size, l2)
            }
            None => CacheCoordinator::new(config.l1_cache_size),
        };

        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            batch_size = config.batch_size,
            l2 = config.l2_cache_path.is_some(),
            "EmbeddingEngine initialized"
        );

        Ok(Self {
            provider,
            cache,
            batch_size: config.batch_size.max(1),
            counters: Counters::default(),
        })
    }

    /// Active provider name.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The cache shared by every call on this engine.
    pub fn cache(&self) -> &CacheCoordinator {
        &self.cache
    }

    /// Snapshot of the cache and provider counters.
    pub fn stats(&self) -> EmbeddingStats {
        EmbeddingStats {
            l1_hits: self.counters.l1_hits.load(Ordering::Relaxed),
            l2_hits: self.counters.l2_hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            provider_calls: self.counters.provider_calls.load(Ordering::Relaxed),
            texts_embedded: self.counters.texts_embedded.load(Ordering::Relaxed),
        }
    }

    /// Embed one provider batch and check it against the contract.
    fn embed_chunk(&self, chunk: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
        if !self.provider.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.provider.name().to_string(),
            }
            .into());
        }

        self.counters.provider_calls.fetch_add(1, Ordering::Relaxed);
        let vectors = self.provider.embed_batch(chunk)?;

        if vectors.len() != chunk.len() {
            warn!(
                provider = self.provider.name(),
                expected = chunk.len(),
                actual = vectors.len(),
                "provider returned wrong number of embeddings"
            );
            return Err(EmbeddingError::CountMismatch {
                expected: chunk.len(),
                actual: vectors.len(),
            }
            .into());
        }

        let dims = self.provider.dimensions();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dims) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dims,
                actual: bad.len(),
            }
            .into());
        }

        self.counters
            .texts_embedded
            .fetch_add(chunk.len() as u64, Ordering::Relaxed);
        Ok(vectors)
    }
}

impl ISimilarityOracle for EmbeddingEngine {
    fn embed(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
        let mut resolved: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut pending: Vec<String> = Vec::new();
        let mut pending_slot: HashMap<&str, usize> = HashMap::new();
        let mut waiting: Vec<(usize, usize)> = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            match self.cache.lookup(text) {
                (Some(vec), tier) => {
                    let counter = match tier {
                        CacheHitTier::L2 => &self.counters.l2_hits,
                        _ => &self.counters.l1_hits,
                    };
                    counter.fetch_add(1, Ordering::Relaxed);
                    resolved[i] = Some(vec);
                }
                (None, _) => {
                    self.counters.misses.fetch_add(1, Ordering::Relaxed);
                    let slot = *pending_slot.entry(text.as_str()).or_insert_with(|| {
                        pending.push(text.clone());
                        pending.len() - 1
                    });
                    waiting.push((i, slot));
                }
            }
        }

        debug!(
            texts = texts.len(),
            misses = pending.len(),
            "embedding lookup complete"
        );

        let mut embedded: Vec<Vec<f32>> = Vec::with_capacity(pending.len());
        for chunk in pending.chunks(self.batch_size) {
            let vectors = self.embed_chunk(chunk)?;
            for (text, vec) in chunk.iter().zip(&vectors) {
                self.cache.put(text, vec);
            }
            embedded.extend(vectors);
        }

        for (i, slot) in waiting {
            resolved[i] = embedded.get(slot).cloned();
        }

        let expected = texts.len();
        let out: Vec<Vec<f32>> = resolved.into_iter().flatten().collect();
        if out.len() != expected {
            return Err(EmbeddingError::CountMismatch {
                expected,
                actual: out.len(),
            }
            .into());
        }

        let dims = self.provider.dimensions();
        if let Some(bad) = out.iter().find(|v| v.len() != dims) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dims,
                actual: bad.len(),
            }
            .into());
        }

        Ok(out)
    }

    fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }
}
