//! Input normalization.
//!
//! Aligns the return and weight matrices, prepends the synthetic cash
//! instrument as column 0 and replaces missing entries with neutral values.

use crate::error::{CurveError, CurveResult};
use crate::unit::ReturnUnit;
use nalgebra::DMatrix;
use tracing::warn;

/// Decimal places kept when summing absolute weights for the cash column.
const CASH_ROUNDING_DIGITS: i32 = 5;

/// Column index of the synthetic cash instrument.
pub const CASH_COLUMN: usize = 0;

/// Return and weight matrices augmented with the cash column.
///
/// Both matrices are `T×(A+1)`, column [`CASH_COLUMN`] is cash, and every
/// entry is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInputs {
    /// Period returns; the cash column holds the risk-free growth factor.
    pub returns: DMatrix<f64>,
    /// Target weights; the cash column holds the unallocated share.
    pub weights: DMatrix<f64>,
}

impl NormalizedInputs {
    /// Number of periods.
    #[must_use]
    pub fn periods(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of columns including cash.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.weights.ncols()
    }
}

/// Builds the augmented matrices.
///
/// The cash weight of row `t` is `1 - round(Σ|W[t,i]|, 5)` over the finite
/// entries of the original weights. Missing returns become `unit.flat()`,
/// missing weights become `0.0`, and the cash return column is set to
/// `risk_free` after sanitization so it is never neutralized.
///
/// # Errors
///
/// Returns [`CurveError::ShapeMismatch`] if the matrices disagree on row or
/// column count.
pub fn normalize(
    returns: &DMatrix<f64>,
    weights: &DMatrix<f64>,
    risk_free: f64,
    unit: ReturnUnit,
) -> CurveResult<NormalizedInputs> {
    if returns.nrows() != weights.nrows() {
        return Err(CurveError::shape_mismatch(
            "weights rows",
            returns.nrows(),
            weights.nrows(),
        ));
    }
    if returns.ncols() != weights.ncols() {
        return Err(CurveError::shape_mismatch(
            "weights columns",
            returns.ncols(),
            weights.ncols(),
        ));
    }

    let (periods, instruments) = weights.shape();
    let cash_weights: Vec<f64> = (0..periods)
        .map(|t| cash_weight(weights.row(t).iter().copied()))
        .collect();

    for (t, &cash) in cash_weights.iter().enumerate() {
        if cash < 0.0 {
            warn!(
                period = t,
                cash_weight = cash,
                "absolute weights exceed 1, cash weight is negative"
            );
        }
    }

    let mut augmented_returns = DMatrix::from_fn(periods, instruments + 1, |t, j| {
        if j == CASH_COLUMN {
            f64::NAN
        } else {
            sanitize(returns[(t, j - 1)], unit.flat())
        }
    });
    // Cash is written last; it must never see the missing-value fallback.
    augmented_returns.column_mut(CASH_COLUMN).fill(risk_free);

    let augmented_weights = DMatrix::from_fn(periods, instruments + 1, |t, j| {
        if j == CASH_COLUMN {
            cash_weights[t]
        } else {
            sanitize(weights[(t, j - 1)], 0.0)
        }
    });

    Ok(NormalizedInputs {
        returns: augmented_returns,
        weights: augmented_weights,
    })
}

/// Unallocated share of a weight row.
pub fn cash_weight(row: impl IntoIterator<Item = f64>) -> f64 {
    let gross: f64 = row
        .into_iter()
        .filter(|w| w.is_finite())
        .map(f64::abs)
        .sum();
    1.0 - round_to(gross, CASH_ROUNDING_DIGITS)
}

fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

#[inline]
fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
