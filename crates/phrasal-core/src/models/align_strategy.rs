use serde::{Deserialize, Serialize};

/// How the backtracker behaves when the final DP cell has no predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignStrategy {
    /// Follow parent links only. On the first undefined link every
    /// remaining unit is left empty.
    Strict,
    /// Scan the column downward for the nearest defined cell, merge the
    /// skipped tokens into the current unit, and keep going.
    #[default]
    Reconciling,
}

impl AlignStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Reconciling => "reconciling",
        }
    }
}

impl std::fmt::Display for AlignStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
