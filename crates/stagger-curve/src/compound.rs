//! Per-tranche compounding.
//!
//! The period growth factor of a tranche is the weighted sum of instrument
//! growth factors:
//!
//! ```text
//! g_t = W[t,cash]·R[t,cash] + Σ_i W[t,i]·growth(R[t,i])
//! ```
//!
//! This additive form approximates intra-period drift between instruments.
//! It is an estimate, not a holdings simulation. Growth factors at or below
//! zero are propagated as-is.

use crate::normalize::{NormalizedInputs, CASH_COLUMN};
use crate::tranche::TrancheSchedule;
use crate::unit::ReturnUnit;
use nalgebra::{DMatrix, DVector};

/// Growth factor of period `t` for the held weight row.
#[must_use]
pub fn period_growth(
    held: impl IntoIterator<Item = f64>,
    returns: &DMatrix<f64>,
    t: usize,
    unit: ReturnUnit,
) -> f64 {
    held.into_iter()
        .enumerate()
        .map(|(j, w)| {
            let r = returns[(t, j)];
            if j == CASH_COLUMN {
                w * r
            } else {
                w * unit.growth(r)
            }
        })
        .sum()
}

/// Compounds one tranche into a value curve of length `T`.
///
/// `V_0 = init_cash` and `V_t = V_{t-1}·g_t`. Periods before the tranche's
/// offset are idle and keep the previous value.
#[must_use]
pub fn compound_tranche(
    schedule: &TrancheSchedule,
    inputs: &NormalizedInputs,
    init_cash: f64,
    unit: ReturnUnit,
) -> DVector<f64> {
    let periods = inputs.periods();
    let mut curve = DVector::zeros(periods);
    if periods == 0 {
        return curve;
    }

    let mut value = init_cash;
    curve[0] = value;
    for t in 1..periods {
        if schedule.is_active(t) {
            let held = schedule.weights.row(t);
            value *= period_growth(held.iter().copied(), &inputs.returns, t, unit);
        }
        curve[t] = value;
    }

    curve
}
