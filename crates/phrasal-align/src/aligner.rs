//! Aligner: the single entry point for one sentence pair.
//!
//! Each call walks INIT → CANDIDATES_BUILT → EMBEDDED → DP_FILLED →
//! BACKTRACKED → DONE. Oracle and configuration failures abort before
//! DP_FILLED and surface as errors; an infeasible tiling never does.

use std::sync::Arc;

use phrasal_core::config::AlignmentConfig;
use phrasal_core::errors::{EmbeddingError, PhrasalResult};
use phrasal_core::traits::ISimilarityOracle;
use phrasal_core::{AlignStrategy, RecoveryEvent, Span};
use phrasal_observability::events;
use serde::Serialize;
use tracing::{debug, trace};

use crate::backtrack::backtrack;
use crate::candidates::{max_span_len, CandidateSet};
use crate::dp;
use crate::scratch::ScratchPool;
use crate::similarity::normalize;

/// Per-call progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlignPhase {
    Init,
    CandidatesBuilt,
    Embedded,
    DpFilled,
    Backtracked,
    Done,
}

/// Everything one call produced.
#[derive(Debug, Clone)]
pub struct AlignmentOutcome {
    /// One entry per source unit; "" where unmatched.
    pub segments: Vec<String>,
    pub spans: Vec<Option<Span>>,
    /// Span length limit used for this sentence.
    pub max_span_len: usize,
    /// Best full-tiling score, `None` when no full tiling exists.
    pub best_score: Option<f64>,
    pub recoveries: Vec<RecoveryEvent>,
    pub phase: AlignPhase,
}

impl AlignmentOutcome {
    /// True when the spans tile the whole target with no recovery.
    pub fn is_full_tiling(&self) -> bool {
        self.best_score.is_some() && self.recoveries.is_empty()
    }
}

/// Aligns source units to target tokens through a similarity oracle.
pub struct Aligner {
    oracle: Arc<dyn ISimilarityOracle>,
    config: AlignmentConfig,
    scratch: ScratchPool,
}

impl Aligner {
    pub fn new(oracle: Arc<dyn ISimilarityOracle>, config: AlignmentConfig) -> Self {
        Self {
            oracle,
            config,
            scratch: ScratchPool::default(),
        }
    }

    /// Replace the backtracking strategy.
    pub fn with_strategy(mut self, strategy: AlignStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> AlignStrategy {
        self.config.strategy
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Span length limit for a sentence of this shape.
    pub fn max_span_len(&self, units: usize, tokens: usize) -> usize {
        max_span_len(
            units,
            tokens,
            self.config.span_multiplier,
            self.config.max_span_cap,
        )
    }

    /// Align and return one segment per source unit.
    pub fn align<S: AsRef<str>, T: AsRef<str>>(
        &self,
        source_units: &[S],
        target_tokens: &[T],
    ) -> PhrasalResult<Vec<String>> {
        Ok(self.align_detailed(source_units, target_tokens)?.segments)
    }

    /// Align and return spans, score, and recovery events as well.
    pub fn align_detailed<S: AsRef<str>, T: AsRef<str>>(
        &self,
        source_units: &[S],
        target_tokens: &[T],
    ) -> PhrasalResult<AlignmentOutcome> {
        let mut phase = AlignPhase::Init;
        self.run(source_units, target_tokens, &mut phase)
            .inspect_err(|e| {
                debug!(phase = ?phase, error = %e, "alignment aborted");
            })
    }

    fn run<S: AsRef<str>, T: AsRef<str>>(
        &self,
        source_units: &[S],
        target_tokens: &[T],
        phase: &mut AlignPhase,
    ) -> PhrasalResult<AlignmentOutcome> {
        let n = source_units.len();
        let m = target_tokens.len();
        let max_len = self.max_span_len(n, m);

        if n == 0 {
            advance(phase, AlignPhase::Done);
            return Ok(AlignmentOutcome {
                segments: Vec::new(),
                spans: Vec::new(),
                max_span_len: max_len,
                best_score: None,
                recoveries: Vec::new(),
                phase: *phase,
            });
        }

        let candidates = CandidateSet::build(target_tokens, max_len)?;
        advance(phase, AlignPhase::CandidatesBuilt);

        let unit_texts: Vec<String> = source_units
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        let unit_vectors = self.embed_normalized(&unit_texts)?;
        let span_vectors = self.embed_normalized(candidates.texts())?;
        advance(phase, AlignPhase::Embedded);

        let table = {
            let mut scratch = self.scratch.acquire(m + 1);
            dp::fill(
                &unit_vectors,
                &span_vectors,
                &candidates,
                &mut scratch,
                self.config.parallel_scoring,
            )?
        };
        advance(phase, AlignPhase::DpFilled);

        let path = backtrack(&table.parents, n, m, self.config.strategy);
        for event in &path.recoveries {
            events::recovery_triggered(event);
        }
        advance(phase, AlignPhase::Backtracked);

        let segments = path.segments(target_tokens);
        events::sentence_aligned(n, m, max_len, table.best_score, path.recoveries.len());
        advance(phase, AlignPhase::Done);

        Ok(AlignmentOutcome {
            segments,
            spans: path.spans,
            max_span_len: max_len,
            best_score: table.best_score,
            recoveries: path.recoveries,
            phase: *phase,
        })
    }

    /// Embed and normalize, enforcing one vector per text of the oracle's
    /// declared width.
    fn embed_normalized(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
        let vectors = self.oracle.embed(texts)?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            }
            .into());
        }

        let dims = self.oracle.dimensions();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dims) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dims,
                actual: bad.len(),
            }
            .into());
        }

        Ok(vectors.iter().map(|v| normalize(v)).collect())
    }
}

fn advance(phase: &mut AlignPhase, next: AlignPhase) {
    trace!(from = ?*phase, to = ?next, "alignment phase");
    *phase = next;
}
