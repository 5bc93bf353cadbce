//! Batch driver: aligns many sentence pairs with per-sentence isolation.
//!
//! A failing or oversized sentence never aborts the batch. It is recorded
//! with its status and receives the empty fallback, one "" per unit.

use phrasal_core::config::BatchConfig;
use phrasal_core::errors::{PhrasalError, PhrasalResult};
use phrasal_core::traits::IUnitProducer;
use phrasal_core::{PhraseRecord, RecoveryEvent};
use phrasal_observability::{events, AlignmentMetrics};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info_span;

use crate::aligner::Aligner;

/// One sentence pair to align.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub sentence_id: u64,
    pub source_units: Vec<String>,
    pub target_tokens: Vec<String>,
}

impl SentencePair {
    pub fn new(sentence_id: u64, source_units: Vec<String>, target_tokens: Vec<String>) -> Self {
        Self {
            sentence_id,
            source_units,
            target_tokens,
        }
    }

    /// Build from raw text, segmenting each side with its producer.
    pub fn from_raw(
        sentence_id: u64,
        source: &str,
        target: &str,
        source_producer: &dyn IUnitProducer,
        target_producer: &dyn IUnitProducer,
    ) -> Self {
        Self::new(
            sentence_id,
            source_producer.split(source),
            target_producer.split(target),
        )
    }

    /// Worst-case DP work, N·M·L.
    pub fn cost(&self, max_span_len: usize) -> u64 {
        (self.source_units.len() as u64)
            .saturating_mul(self.target_tokens.len() as u64)
            .saturating_mul(max_span_len as u64)
    }
}

/// How a sentence came out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SentenceStatus {
    Aligned,
    Recovered { recoveries: usize },
    Failed { reason: String },
    Skipped { cost: u64 },
}

impl SentenceStatus {
    /// Whether the segments are the empty fallback rather than an alignment.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Skipped { .. })
    }
}

/// Result for one sentence pair.
#[derive(Debug, Clone)]
pub struct SentenceAlignment {
    pub sentence_id: u64,
    pub source_units: Vec<String>,
    pub segments: Vec<String>,
    pub recoveries: Vec<RecoveryEvent>,
    pub status: SentenceStatus,
}

/// Results in input order plus aggregate counters.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub sentences: Vec<SentenceAlignment>,
    pub metrics: AlignmentMetrics,
}

impl BatchReport {
    /// Flatten to one record per source unit.
    pub fn phrase_records(&self) -> Vec<PhraseRecord> {
        self.sentences
            .iter()
            .flat_map(|s| {
                s.source_units
                    .iter()
                    .zip(&s.segments)
                    .enumerate()
                    .map(|(idx, (source, target))| PhraseRecord {
                        sentence_id: s.sentence_id,
                        phrase_id: idx + 1,
                        source_phrase: source.clone(),
                        target_phrase: target.clone(),
                    })
            })
            .collect()
    }
}

pub struct BatchAligner {
    aligner: Aligner,
    config: BatchConfig,
    pool: Option<rayon::ThreadPool>,
}

impl BatchAligner {
    pub fn new(aligner: Aligner, config: BatchConfig) -> PhrasalResult<Self> {
        let pool = match config.threads {
            Some(threads) if config.parallel => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("phrasal-align-{i}"))
                    .build()
                    .map_err(|e| PhrasalError::ConfigError {
                        reason: format!("batch thread pool: {e}"),
                    })?,
            ),
            _ => None,
        };
        Ok(Self {
            aligner,
            config,
            pool,
        })
    }

    pub fn aligner(&self) -> &Aligner {
        &self.aligner
    }

    /// Align every pair. Output order matches input order.
    pub fn align_all(&self, pairs: &[SentencePair]) -> BatchReport {
        let sentences: Vec<SentenceAlignment> = if self.config.parallel {
            let run = || -> Vec<SentenceAlignment> {
                pairs.par_iter().map(|p| self.align_one(p)).collect()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        } else {
            pairs.iter().map(|p| self.align_one(p)).collect()
        };

        let mut metrics = AlignmentMetrics::new();
        for s in &sentences {
            match &s.status {
                SentenceStatus::Aligned | SentenceStatus::Recovered { .. } => {
                    metrics.record_alignment(&s.segments, &s.recoveries)
                }
                SentenceStatus::Failed { .. } => metrics.record_failure(s.source_units.len()),
                SentenceStatus::Skipped { .. } => metrics.record_skip(s.source_units.len()),
            }
        }

        BatchReport { sentences, metrics }
    }

    /// Align a single pair under its own `sentence` span.
    pub fn align_one(&self, pair: &SentencePair) -> SentenceAlignment {
        let span = info_span!("sentence", sentence_id = pair.sentence_id);
        let _guard = span.enter();

        let n = pair.source_units.len();
        let fallback = |status| SentenceAlignment {
            sentence_id: pair.sentence_id,
            source_units: pair.source_units.clone(),
            segments: vec![String::new(); n],
            recoveries: Vec::new(),
            status,
        };

        let budget = self.config.max_sentence_cost;
        let cost = pair.cost(
            self.aligner
                .max_span_len(n, pair.target_tokens.len()),
        );
        if budget > 0 && cost > budget {
            events::sentence_skipped(pair.sentence_id, cost, budget);
            return fallback(SentenceStatus::Skipped { cost });
        }

        match self
            .aligner
            .align_detailed(&pair.source_units, &pair.target_tokens)
        {
            Ok(outcome) => {
                let status = if outcome.recoveries.is_empty() {
                    SentenceStatus::Aligned
                } else {
                    SentenceStatus::Recovered {
                        recoveries: outcome.recoveries.len(),
                    }
                };
                SentenceAlignment {
                    sentence_id: pair.sentence_id,
                    source_units: pair.source_units.clone(),
                    segments: outcome.segments,
                    recoveries: outcome.recoveries,
                    status,
                }
            }
            Err(e) => {
                let reason = e.to_string();
                events::sentence_failed(pair.sentence_id, n, &reason);
                fallback(SentenceStatus::Failed { reason })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use phrasal_core::config::AlignmentConfig;
    use phrasal_core::traits::ISimilarityOracle;

    use super::*;
    use crate::tokenize::WhitespaceTokenizer;

    struct ConstOracle;

    impl ISimilarityOracle for ConstOracle {
        fn embed(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }
        fn dimensions(&self) -> usize {
            2
        }
    }

    fn driver(config: BatchConfig) -> BatchAligner {
        let aligner = Aligner::new(Arc::new(ConstOracle), AlignmentConfig::default());
        BatchAligner::new(aligner, config).unwrap()
    }

    #[test]
    fn pair_from_raw_uses_producers() {
        let pair = SentencePair::from_raw(
            7,
            "子曰 學而時習之",
            "공자가 말하길\n배우고",
            &WhitespaceTokenizer,
            &WhitespaceTokenizer,
        );
        assert_eq!(pair.source_units, vec!["子曰", "學而時習之"]);
        assert_eq!(pair.target_tokens.len(), 3);
    }

    #[test]
    fn cost_is_units_tokens_span() {
        let pair = SentencePair::new(1, vec!["a".into(); 3], vec!["b".into(); 4]);
        assert_eq!(pair.cost(2), 24);
    }

    #[test]
    fn over_budget_sentence_is_skipped() {
        let d = driver(BatchConfig {
            parallel: false,
            max_sentence_cost: 1,
            threads: None,
        });
        let pair = SentencePair::new(1, vec!["a".into(), "b".into()], vec!["x".into(); 4]);
        let report = d.align_all(&[pair]);
        let s = &report.sentences[0];
        assert_eq!(s.status, SentenceStatus::Skipped { cost: 32 });
        assert_eq!(s.segments, vec!["", ""]);
        assert_eq!(report.metrics.sentences_skipped, 1);
    }

    #[test]
    fn dedicated_pool_keeps_order() {
        let d = driver(BatchConfig {
            parallel: true,
            max_sentence_cost: 0,
            threads: Some(2),
        });
        let pairs: Vec<_> = (0..16)
            .map(|id| SentencePair::new(id, vec!["u".into()], vec![format!("t{id}")]))
            .collect();
        let report = d.align_all(&pairs);
        let ids: Vec<u64> = report.sentences.iter().map(|s| s.sentence_id).collect();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
        assert_eq!(report.sentences[5].segments, vec!["t5"]);
        assert_eq!(report.metrics.sentences_aligned, 16);
    }

    #[test]
    fn status_serializes_with_tag() {
        let json = serde_json::to_string(&SentenceStatus::Skipped { cost: 9 }).unwrap();
        assert_eq!(json, r#"{"status":"skipped","cost":9}"#);
    }
}
