//! Staggered tranche schedules.
//!
//! Capital is split into `funds` tranches. Tranche `k` rebalances at periods
//! `k, k + freq, k + 2·freq, …` and holds the weight row sampled at each
//! rebalance for the whole block. Spreading the entry dates across the
//! `freq`-period cycle is what smooths the blended curve.
//!
//! For a single instrument with target weights `[0,1,1,1,0,0]` and
//! `freq = funds = 3`:
//!
//! ```text
//! offset 0: [0,0,0,1,1,1]   samples rows 0, 3
//! offset 1: [0,1,1,1,0,0]   samples rows 1, 4
//! offset 2: [0,0,1,1,1,0]   samples rows 2, 5
//! ```

use nalgebra::DMatrix;

/// Held-weight schedule of one tranche.
#[derive(Debug, Clone, PartialEq)]
pub struct TrancheSchedule {
    /// Rebalance offset; the first period this tranche holds anything.
    pub offset: usize,
    /// `T×(A+1)` weights actually held, cash column included.
    pub weights: DMatrix<f64>,
}

impl TrancheSchedule {
    /// Returns true if the tranche has entered by period `t`.
    #[inline]
    #[must_use]
    pub fn is_active(&self, t: usize) -> bool {
        t >= self.offset
    }

    /// Weights held for one instrument column across all periods.
    #[must_use]
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.weights.column(j).iter().copied().collect()
    }
}

/// First period of the block covering `t` for a tranche at `offset`.
///
/// Returns `None` for periods before the tranche's first rebalance.
#[inline]
#[must_use]
pub fn block_start(t: usize, offset: usize, freq: usize) -> Option<usize> {
    if t < offset {
        None
    } else {
        Some(offset + (t - offset) / freq * freq)
    }
}

/// Derives the held-weight schedule of the tranche at `offset`.
///
/// Every row `t ≥ offset` copies the row sampled at its block start; rows
/// before `offset` are all zero. Offsets at or above `freq` are not folded
/// back: they sample the same rows as `offset % freq` but enter later.
#[must_use]
pub fn build_schedule(weights: &DMatrix<f64>, offset: usize, freq: usize) -> TrancheSchedule {
    let (periods, columns) = weights.shape();
    let mut held = DMatrix::zeros(periods, columns);

    for t in offset..periods {
        if let Some(start) = block_start(t, offset, freq) {
            held.set_row(t, &weights.row(start));
        }
    }

    TrancheSchedule {
        offset,
        weights: held,
    }
}

/// Derives the schedules of tranches `0..funds`.
#[must_use]
pub fn build_schedules(weights: &DMatrix<f64>, funds: usize, freq: usize) -> Vec<TrancheSchedule> {
    (0..funds)
        .map(|offset| build_schedule(weights, offset, freq))
        .collect()
}
