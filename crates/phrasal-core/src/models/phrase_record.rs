use serde::{Deserialize, Serialize};

use crate::errors::PhrasalResult;

/// One aligned phrase pair, as consumed by tabular export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRecord {
    pub sentence_id: u64,
    /// One-based position of the phrase within its sentence.
    pub phrase_id: usize,
    pub source_phrase: String,
    pub target_phrase: String,
}

impl PhraseRecord {
    /// Serialize as a single JSON line.
    pub fn to_json_line(&self) -> PhrasalResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
