//! E2E tests for the similarity oracle.
//!
//! Each test targets a failure mode that would corrupt an alignment run:
//! - Persistent cache not surviving a restart → full re-embed of a corpus
//! - Stale vectors after switching providers
//! - Mixed hit/miss calls returning vectors in the wrong order
//! - Concurrent workers racing on the same text
//! - Providers returning vectors of the wrong width

use std::sync::Arc;
use std::thread;

use phrasal_core::config::EmbeddingConfig;
use phrasal_core::errors::{EmbeddingError, PhrasalError, PhrasalResult};
use phrasal_core::traits::{IEmbeddingProvider, ISimilarityOracle};
use phrasal_embeddings::{EmbeddingEngine, HashedNgramProvider};

fn test_config(dims: usize) -> EmbeddingConfig {
    EmbeddingConfig {
        provider: "hashed".to_string(),
        dimensions: dims,
        batch_size: 4,
        l1_cache_size: Some(1_000),
        ..Default::default()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// L2 CACHE: persistence
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn l2_cache_survives_engine_restart() {
    let dir = std::env::temp_dir().join("phrasal_e2e_l2_restart");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let db_path = dir.join("embeddings.db");

    let config = EmbeddingConfig {
        l2_cache_path: Some(db_path.to_string_lossy().into_owned()),
        ..test_config(16)
    };
    let texts = strings(&["天命之謂性", "하늘이 명한 것을"]);

    let first = EmbeddingEngine::new(&config).unwrap();
    let original = first.embed(&texts).unwrap();
    assert_eq!(first.stats().texts_embedded, 2);
    drop(first);

    let second = EmbeddingEngine::new(&config).unwrap();
    let restored = second.embed(&texts).unwrap();
    assert_eq!(restored, original);
    let stats = second.stats();
    assert_eq!(stats.texts_embedded, 0, "restart must not re-embed");
    assert_eq!(stats.l2_hits, 2);

    let _ = std::fs::remove_dir_all(&dir);
}

/// Two providers with different widths share one cache file. The second
/// must not be served the first one's vectors.
#[test]
fn l2_cache_is_namespaced_by_provider_dimensions() {
    let dir = std::env::temp_dir().join("phrasal_e2e_l2_namespace");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let path = Some(dir.join("shared.db").to_string_lossy().into_owned());

    let narrow = EmbeddingEngine::new(&EmbeddingConfig {
        l2_cache_path: path.clone(),
        ..test_config(8)
    })
    .unwrap();
    narrow.embed(&strings(&["子曰"])).unwrap();
    drop(narrow);

    let wide = EmbeddingEngine::new(&EmbeddingConfig {
        l2_cache_path: path,
        ..test_config(32)
    })
    .unwrap();
    let out = wide.embed(&strings(&["子曰"])).unwrap();
    assert_eq!(out[0].len(), 32);
    assert_eq!(wide.stats().l2_hits, 0);

    let _ = std::fs::remove_dir_all(&dir);
}

// ═══════════════════════════════════════════════════════════════════════════
// ORDERING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mixed_hits_and_misses_keep_input_order() {
    let engine = EmbeddingEngine::new(&test_config(64)).unwrap();
    engine.embed(&strings(&["b", "d"])).unwrap();

    let texts = strings(&["a", "b", "c", "d", "e"]);
    let out = engine.embed(&texts).unwrap();
    let expected = HashedNgramProvider::new(64).embed_batch(&texts).unwrap();
    assert_eq!(out, expected);
}

// ═══════════════════════════════════════════════════════════════════════════
// CONCURRENCY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn concurrent_workers_get_identical_vectors() {
    let engine = Arc::new(EmbeddingEngine::new(&test_config(64)).unwrap());
    let texts = strings(&["배우고", "때로", "익히면", "배우고 때로"]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let texts = texts.clone();
            thread::spawn(move || engine.embed(&texts).unwrap())
        })
        .collect();

    let results: Vec<Vec<Vec<f32>>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for r in &results[1..] {
        assert_eq!(r, &results[0]);
    }
    // Races may embed a text more than once, never more than once per worker.
    assert!(engine.stats().texts_embedded <= 8 * texts.len() as u64);
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTRACT VIOLATIONS
// ═══════════════════════════════════════════════════════════════════════════

struct WrongWidthProvider;

impl IEmbeddingProvider for WrongWidthProvider {
    fn embed_batch(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![0.5; 3]).collect())
    }
    fn dimensions(&self) -> usize {
        4
    }
    fn name(&self) -> &str {
        "wrong-width"
    }
    fn is_available(&self) -> bool {
        true
    }
}

#[test]
fn wrong_width_vectors_are_rejected() {
    let engine =
        EmbeddingEngine::with_provider(Box::new(WrongWidthProvider), &test_config(4)).unwrap();
    let err = engine.embed(&strings(&["子曰"])).unwrap_err();
    assert!(matches!(
        err,
        PhrasalError::EmbeddingError(EmbeddingError::DimensionMismatch {
            expected: 4,
            actual: 3
        })
    ));
}

struct OfflineProvider;

impl IEmbeddingProvider for OfflineProvider {
    fn embed_batch(&self, _texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "should not be called".to_string(),
        }
        .into())
    }
    fn dimensions(&self) -> usize {
        4
    }
    fn name(&self) -> &str {
        "offline"
    }
    fn is_available(&self) -> bool {
        false
    }
}

#[test]
fn unavailable_provider_fails_only_on_miss() {
    let engine =
        EmbeddingEngine::with_provider(Box::new(OfflineProvider), &test_config(4)).unwrap();
    assert!(engine.embed(&[]).unwrap().is_empty());

    let err = engine.embed(&strings(&["子曰"])).unwrap_err();
    assert!(matches!(
        err,
        PhrasalError::EmbeddingError(EmbeddingError::ProviderUnavailable { .. })
    ));
}
