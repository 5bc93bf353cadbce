//! Path reconstruction from the parent table.
//!
//! Always yields exactly one (possibly absent) span per unit. When the
//! final cell is unreachable the strategy decides how the path degrades;
//! every degradation step is reported as a [`RecoveryEvent`].

use chrono::Utc;
use phrasal_core::constants::ALIGNER_COMPONENT;
use phrasal_core::{AlignStrategy, RecoveryAction, RecoveryEvent, Span};

use crate::dp::ParentTable;

/// Reconstructed path.
#[derive(Debug, Clone, Default)]
pub struct Backtrack {
    /// `spans[i]` is unit `i`'s span, `None` when the unit is unmatched.
    pub spans: Vec<Option<Span>>,
    pub recoveries: Vec<RecoveryEvent>,
}

impl Backtrack {
    /// Span texts in unit order, "" for unmatched units.
    pub fn segments<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        self.spans
            .iter()
            .map(|span| span.map(|s| s.text(tokens)).unwrap_or_default())
            .collect()
    }
}

fn recovery(unit_index: usize, column: usize, action: RecoveryAction) -> RecoveryEvent {
    RecoveryEvent {
        component: ALIGNER_COMPONENT.to_string(),
        unit_index,
        column,
        action,
        timestamp: Utc::now(),
    }
}

/// Walk from `(units, tokens)` back to the origin.
pub fn backtrack(
    parents: &ParentTable,
    units: usize,
    tokens: usize,
    strategy: AlignStrategy,
) -> Backtrack {
    match strategy {
        AlignStrategy::Strict => strict(parents, units, tokens),
        AlignStrategy::Reconciling => reconciling(parents, units, tokens),
    }
}

/// Follow parent links; the first missing link empties every unit left.
fn strict(parents: &ParentTable, units: usize, tokens: usize) -> Backtrack {
    let mut out = Backtrack {
        spans: vec![None; units],
        recoveries: Vec::new(),
    };
    let (mut i, mut j) = (units, tokens);

    while i > 0 {
        let Some(k) = parents.get(i, j) else {
            break;
        };
        out.spans[i - 1] = Some(Span::new(k, j));
        i -= 1;
        j = k;
    }

    for unit in (0..i).rev() {
        out.recoveries
            .push(recovery(unit, j, RecoveryAction::EmptyUnit));
    }
    out
}

/// Follow parent links; on a missing link scan the column downward for
/// the nearest defined cell and merge the skipped tokens into this unit,
/// or leave the unit empty if the column has none.
fn reconciling(parents: &ParentTable, units: usize, tokens: usize) -> Backtrack {
    let mut out = Backtrack {
        spans: vec![None; units],
        recoveries: Vec::new(),
    };
    let (mut i, mut j) = (units, tokens);

    while i > 0 {
        if let Some(k) = parents.get(i, j) {
            out.spans[i - 1] = Some(Span::new(k, j));
            i -= 1;
            j = k;
            continue;
        }

        match (0..j).rev().find(|&jp| parents.get(i, jp).is_some()) {
            Some(jp) => {
                out.spans[i - 1] = Some(Span::new(jp, j));
                out.recoveries.push(recovery(
                    i - 1,
                    j,
                    RecoveryAction::MergedTokens { from: jp, to: j },
                ));
                j = jp;
            }
            None => {
                out.recoveries
                    .push(recovery(i - 1, j, RecoveryAction::EmptyUnit));
            }
        }
        i -= 1;
    }
    out
}
