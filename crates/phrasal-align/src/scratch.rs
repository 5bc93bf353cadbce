//! Rolling DP buffers and the pool that recycles them between calls.
//!
//! A scratch is only usable after `prepare` sizes it for the current
//! sentence. Leases reset it on acquire and invalidate it on release, so
//! nothing from one sentence is visible to the next.

use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

use phrasal_core::errors::{AlignmentError, PhrasalResult};

/// Two rows of the score table: the finished row `i - 1` and row `i`.
#[derive(Debug, Default)]
pub struct DpScratch {
    prev: Vec<f64>,
    curr: Vec<f64>,
    width: usize,
}

impl DpScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size both rows to `width` and seed row 0: `dp[0][0] = 0`, rest −∞.
    pub fn prepare(&mut self, width: usize) {
        self.prev.clear();
        self.prev.resize(width, f64::NEG_INFINITY);
        self.curr.clear();
        self.curr.resize(width, f64::NEG_INFINITY);
        if let Some(first) = self.prev.first_mut() {
            *first = 0.0;
        }
        self.width = width;
    }

    /// Fail unless the scratch was prepared for exactly `width` columns.
    pub fn ensure(&self, width: usize) -> PhrasalResult<()> {
        if self.width != width || self.prev.len() != width || self.curr.len() != width {
            return Err(AlignmentError::ScratchNotPrepared {
                expected: width,
                actual: self.width,
            }
            .into());
        }
        Ok(())
    }

    /// Reset the current row to −∞.
    pub fn begin_row(&mut self) {
        self.curr.fill(f64::NEG_INFINITY);
    }

    /// Make the current row the previous one.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.prev, &mut self.curr);
    }

    pub fn prev(&self) -> &[f64] {
        &self.prev
    }

    pub fn curr_mut(&mut self) -> &mut [f64] {
        &mut self.curr
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Mark the buffers unusable until the next `prepare`.
    fn invalidate(&mut self) {
        self.width = 0;
    }
}

/// Pool of scratch buffers shared by concurrent alignment calls.
#[derive(Debug)]
pub struct ScratchPool {
    free: Mutex<Vec<DpScratch>>,
    max_idle: usize,
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new(num_idle_default())
    }
}

fn num_idle_default() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl ScratchPool {
    /// Pool that keeps at most `max_idle` released buffers.
    pub fn new(max_idle: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Take a scratch prepared for `width` columns.
    pub fn acquire(&self, width: usize) -> ScratchLease<'_> {
        let mut scratch = self
            .free
            .lock()
            .ok()
            .and_then(|mut free| free.pop())
            .unwrap_or_default();
        scratch.prepare(width);
        ScratchLease {
            scratch,
            pool: self,
        }
    }

    /// Number of idle buffers.
    pub fn idle(&self) -> usize {
        self.free.lock().map(|f| f.len()).unwrap_or(0)
    }

    fn release(&self, mut scratch: DpScratch) {
        scratch.invalidate();
        if let Ok(mut free) = self.free.lock() {
            if free.len() < self.max_idle {
                free.push(scratch);
            }
        }
    }
}

/// A scratch checked out of a [`ScratchPool`]; returned on drop.
pub struct ScratchLease<'a> {
    scratch: DpScratch,
    pool: &'a ScratchPool,
}

impl Deref for ScratchLease<'_> {
    type Target = DpScratch;

    fn deref(&self) -> &DpScratch {
        &self.scratch
    }
}

impl DerefMut for ScratchLease<'_> {
    fn deref_mut(&mut self) -> &mut DpScratch {
        &mut self.scratch
    }
}

impl Drop for ScratchLease<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.scratch));
    }
}
