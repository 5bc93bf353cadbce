use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the backtracker did when a parent link was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryAction {
    /// Tokens `[from, to)` were merged into the unit.
    MergedTokens { from: usize, to: usize },
    /// The unit was left empty.
    EmptyUnit,
}

impl RecoveryAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MergedTokens { .. } => "merged_tokens",
            Self::EmptyUnit => "empty_unit",
        }
    }
}

/// A recovery path firing during backtracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryEvent {
    pub component: String,
    /// Zero-based source unit index.
    pub unit_index: usize,
    /// Target cut position where the parent link was missing.
    pub column: usize,
    pub action: RecoveryAction,
    pub timestamp: DateTime<Utc>,
}
