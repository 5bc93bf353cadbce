//! Candidate span generation.
//!
//! Enumerates every contiguous target range of length `1..=L`, start-major
//! then length-minor. The ordering is stable, so span ids and tie-breaks
//! are reproducible across runs.

use phrasal_core::errors::{AlignmentError, PhrasalResult};
use phrasal_core::Span;

/// Span length limit for `units` source units over `tokens` target tokens:
/// `clamp(multiplier * floor(tokens / units), 1, cap)`, or 1 with no units.
pub fn max_span_len(units: usize, tokens: usize, multiplier: usize, cap: usize) -> usize {
    if units == 0 {
        return 1;
    }
    multiplier
        .saturating_mul(tokens / units)
        .clamp(1, cap.max(1))
}

/// Every feasible span over one target sentence.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    spans: Vec<Span>,
    texts: Vec<String>,
    /// `offsets[s]` is the id of span `(s, s + 1)`.
    offsets: Vec<usize>,
    max_len: usize,
    token_count: usize,
}

impl CandidateSet {
    /// Build the candidate set. A zero span limit is rejected.
    pub fn build<S: AsRef<str>>(tokens: &[S], max_len: usize) -> PhrasalResult<Self> {
        if max_len == 0 {
            return Err(AlignmentError::InvalidSpanLimit { value: max_len }.into());
        }

        let m = tokens.len();
        let mut spans = Vec::new();
        let mut texts = Vec::new();
        let mut offsets = Vec::with_capacity(m);

        for start in 0..m {
            offsets.push(spans.len());
            for end in (start + 1)..=(start + max_len).min(m) {
                let span = Span::new(start, end);
                texts.push(span.text(tokens));
                spans.push(span);
            }
        }

        Ok(Self {
            spans,
            texts,
            offsets,
            max_len,
            token_count: m,
        })
    }

    /// Id of span `(start, end)`, or `None` if it is not a candidate.
    pub fn id(&self, start: usize, end: usize) -> Option<usize> {
        if start >= end || end > self.token_count || end - start > self.max_len {
            return None;
        }
        Some(self.offsets[start] + (end - start - 1))
    }

    pub fn span(&self, id: usize) -> Option<Span> {
        self.spans.get(id).copied()
    }

    /// Span texts, indexed by id.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}
