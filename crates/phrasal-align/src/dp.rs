//! The alignment DP.
//!
//! `dp[i][j]` is the best summed similarity of mapping units `0..i` onto
//! tokens `0..j`, each unit taking one candidate span:
//!
//! ```text
//! dp[0][0] = 0
//! dp[i][j] = max over k in [i-1, j-1], (k, j) a candidate,
//!            of dp[i-1][k] + sim(U[i-1], S[(k, j)])
//! ```
//!
//! Only two score rows are live at a time. The parent table is kept whole
//! for backtracking. Among equal scores the lowest `k` wins.

use phrasal_core::errors::PhrasalResult;
use rayon::prelude::*;

use crate::candidates::CandidateSet;
use crate::scratch::DpScratch;
use crate::similarity::similarity;

/// `parent[i][j] = k`: the span `(k, j)` closed unit `i` in the best path.
#[derive(Debug, Clone)]
pub struct ParentTable {
    width: usize,
    cells: Vec<Option<usize>>,
}

impl ParentTable {
    pub fn new(rows: usize, width: usize) -> Self {
        Self {
            width,
            cells: vec![None; rows * width],
        }
    }

    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        if j >= self.width {
            return None;
        }
        self.cells.get(i * self.width + j).copied().flatten()
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, k: usize) {
        self.cells[i * self.width + j] = Some(k);
    }
    /// Number of target cut positions (`M + 1`).
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Filled table.
#[derive(Debug, Clone)]
pub struct DpOutcome {
    pub parents: ParentTable,
    /// `dp[N][M]`, or `None` when no full tiling exists.
    pub best_score: Option<f64>,
}

/// Fill the table for normalized unit vectors against normalized span
/// vectors indexed by candidate id.
///
/// `scratch` must be prepared for `candidates.token_count() + 1` columns.
/// With `parallel`, the columns of each row are scored on the rayon pool;
/// rows stay sequential and the result is identical.
pub fn fill(
    units: &[Vec<f32>],
    span_vectors: &[Vec<f32>],
    candidates: &CandidateSet,
    scratch: &mut DpScratch,
    parallel: bool,
) -> PhrasalResult<DpOutcome> {
    let n = units.len();
    let m = candidates.token_count();
    let width = m + 1;
    scratch.ensure(width)?;

    let mut parents = ParentTable::new(n + 1, width);
    let max_len = candidates.max_len();

    for i in 1..=n {
        scratch.begin_row();
        let unit = &units[i - 1];
        let prev = scratch.prev();

        let best_cell = |j: usize| -> (usize, f64, Option<usize>) {
            let mut best = f64::NEG_INFINITY;
            let mut arg = None;
            for k in (i - 1).max(j.saturating_sub(max_len))..j {
                let base = prev[k];
                if base == f64::NEG_INFINITY {
                    continue;
                }
                let Some(id) = candidates.id(k, j) else {
                    continue;
                };
                let score = base + similarity(unit, &span_vectors[id]);
                if score > best {
                    best = score;
                    arg = Some(k);
                }
            }
            (j, best, arg)
        };

        let row: Vec<(usize, f64, Option<usize>)> = if parallel {
            (i..=m).into_par_iter().map(best_cell).collect()
        } else {
            (i..=m).map(best_cell).collect()
        };

        let curr = scratch.curr_mut();
        for (j, score, arg) in row {
            if let Some(k) = arg {
                curr[j] = score;
                parents.set(i, j, k);
            }
        }
        scratch.swap();
    }

    let last = scratch.prev()[m];
    let best_score = (n > 0 && last.is_finite()).then_some(last);

    Ok(DpOutcome {
        parents,
        best_score,
    })
}
