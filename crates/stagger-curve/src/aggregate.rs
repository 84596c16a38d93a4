//! Blending of tranche curves.

use nalgebra::{DMatrix, DVector};

/// Output of the estimator.
#[derive(Debug, Clone, PartialEq)]
pub enum CumulativeReturns {
    /// One curve: the equal-capital blend of all tranches, net of the
    /// benchmark growth curve when one was supplied.
    Blended(DVector<f64>),

    /// One column per tranche; column `k` is the tranche at offset `k`.
    PerTranche(DMatrix<f64>),
}

impl CumulativeReturns {
    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Blended(curve) => curve.len(),
            Self::PerTranche(curves) => curves.nrows(),
        }
    }

    /// Returns true if there are no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The blended curve, if this is one.
    #[must_use]
    pub fn as_blended(&self) -> Option<&DVector<f64>> {
        match self {
            Self::Blended(curve) => Some(curve),
            Self::PerTranche(_) => None,
        }
    }

    /// The per-tranche curves, if these are they.
    #[must_use]
    pub fn as_per_tranche(&self) -> Option<&DMatrix<f64>> {
        match self {
            Self::Blended(_) => None,
            Self::PerTranche(curves) => Some(curves),
        }
    }

    /// Converts into a `T×n` matrix (`n = 1` for a blended curve).
    #[must_use]
    pub fn into_matrix(self) -> DMatrix<f64> {
        match self {
            Self::Blended(curve) => {
                let periods = curve.len();
                DMatrix::from_column_slice(periods, 1, curve.as_slice())
            }
            Self::PerTranche(curves) => curves,
        }
    }
}

/// Row-wise mean across tranche curves.
#[must_use]
pub fn blend_tranches(curves: &DMatrix<f64>) -> DVector<f64> {
    let funds = curves.ncols() as f64;
    DVector::from_iterator(
        curves.nrows(),
        curves.row_iter().map(|row| row.iter().sum::<f64>() / funds),
    )
}

/// Cumulative growth of a benchmark starting from 1.0.
///
/// Non-finite benchmark returns count as flat periods.
#[must_use]
pub fn benchmark_growth(benchmark: &[f64]) -> DVector<f64> {
    let mut value = 1.0;
    DVector::from_iterator(
        benchmark.len(),
        benchmark.iter().map(|&r| {
            if r.is_finite() {
                value *= 1.0 + r;
            }
            value
        }),
    )
}

/// Combines tranche curves into the estimator output.
///
/// With `return_mean = false` the curves are returned untouched and the
/// benchmark is ignored. Otherwise the tranches are blended and, if given,
/// the benchmark growth curve is subtracted. The benchmark curve starts at
/// 1.0 regardless of the tranches' starting value.
///
/// # Panics
///
/// Panics if a benchmark is given whose length differs from the curve length.
#[must_use]
pub fn aggregate(
    curves: DMatrix<f64>,
    return_mean: bool,
    benchmark: Option<&[f64]>,
) -> CumulativeReturns {
    if !return_mean {
        return CumulativeReturns::PerTranche(curves);
    }

    let blended = blend_tranches(&curves);
    match benchmark {
        Some(benchmark) => CumulativeReturns::Blended(blended - benchmark_growth(benchmark)),
        None => CumulativeReturns::Blended(blended),
    }
}
