//! Cumulative return estimation.
//!
//! Runs the four stages in order: normalize the inputs, derive one held-weight
//! schedule per tranche, compound each tranche, then blend.

use crate::aggregate::{aggregate, CumulativeReturns};
use crate::compound::compound_tranche;
use crate::config::CurveConfig;
use crate::error::{CurveError, CurveResult};
use crate::input::IntoPeriodMatrix;
use crate::normalize::normalize;
use crate::parallel::maybe_parallel_map;
use crate::tranche::build_schedule;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

/// Estimates the cumulative return curve of a signal traded in staggered tranches.
///
/// Capital is split into `config.funds` tranches. Tranche `k` rebalances every
/// `config.freq` periods starting at period `k`, holding the weight row
/// sampled at each rebalance. Each tranche compounds from `config.init_cash`;
/// unallocated weight sits in a cash column growing by `config.risk_free` per
/// period.
///
/// # Arguments
///
/// * `returns` - `T×A` (or `T`) period returns, recorded at the exit period
/// * `weights` - `T×A` (or `T`) target weights, already shifted to the exit period
/// * `benchmark` - Optional `T` benchmark simple returns
/// * `config` - Tranche geometry and blending parameters
///
/// # Returns
///
/// A blended `T` curve when `config.return_mean` is set (net of the
/// benchmark's growth curve if one is given), otherwise a `T×funds` matrix.
///
/// # Errors
///
/// - [`CurveError::InvalidParameter`] if `funds` or `freq` is zero
/// - [`CurveError::ShapeMismatch`] if the inputs disagree on shape or the
///   benchmark length differs from `T`
/// - [`CurveError::RaggedRows`] if a row-major input is ragged
///
/// Missing returns and weights are substituted, never raised.
///
/// # Example
///
/// ```rust
/// use stagger_curve::{compute_cumulative_returns, CurveConfig};
///
/// let returns = vec![0.0, 0.01, -0.02, 0.03, 0.01, 0.0];
/// let weights = vec![0.0, 1.0, 1.0, 1.0, 0.0, 0.0];
///
/// let curve = compute_cumulative_returns(returns, weights, None, &CurveConfig::default())
///     .unwrap();
/// assert_eq!(curve.len(), 6);
/// assert_eq!(curve.as_blended().unwrap()[0], 1.0);
/// ```
pub fn compute_cumulative_returns<R, W>(
    returns: R,
    weights: W,
    benchmark: Option<&[f64]>,
    config: &CurveConfig,
) -> CurveResult<CumulativeReturns>
where
    R: IntoPeriodMatrix,
    W: IntoPeriodMatrix,
{
    config.validate()?;

    let returns = returns.into_period_matrix()?;
    let weights = weights.into_period_matrix()?;
    let inputs = normalize(&returns, &weights, config.risk_free, config.return_unit)?;

    if let Some(benchmark) = benchmark {
        if benchmark.len() != inputs.periods() {
            return Err(CurveError::shape_mismatch(
                "benchmark length",
                inputs.periods(),
                benchmark.len(),
            ));
        }
    }

    debug!(
        periods = inputs.periods(),
        instruments = inputs.columns() - 1,
        funds = config.funds,
        freq = config.freq,
        unit = %config.return_unit,
        benchmark = benchmark.is_some(),
        "computing staggered cumulative returns"
    );

    let offsets: Vec<usize> = (0..config.funds).collect();
    let curves: Vec<DVector<f64>> = maybe_parallel_map(&offsets, config, |&offset| {
        trace!(offset, "compounding tranche");
        let schedule = build_schedule(&inputs.weights, offset, config.freq);
        compound_tranche(&schedule, &inputs, config.init_cash, config.return_unit)
    });

    Ok(aggregate(
        DMatrix::from_columns(&curves),
        config.return_mean,
        benchmark,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::ReturnUnit;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_tranche_matches_plain_compounding() {
        let config = CurveConfig::new().with_funds(1).with_freq(1);
        let out = compute_cumulative_returns(
            vec![0.0, 0.1, 0.1],
            vec![1.0, 1.0, 1.0],
            None,
            &config,
        )
        .unwrap();

        let curve = out.as_blended().unwrap();
        assert_relative_eq!(curve[2], 1.21, epsilon = 1e-12);
    }

    #[test]
    fn test_per_tranche_shape() {
        let config = CurveConfig::new().with_funds(4).with_return_mean(false);
        let out = compute_cumulative_returns(
            DMatrix::<f64>::zeros(10, 3),
            DMatrix::<f64>::zeros(10, 3),
            None,
            &config,
        )
        .unwrap();

        assert_eq!(out.as_per_tranche().unwrap().shape(), (10, 4));
    }

    #[test]
    fn test_growth_unit() {
        let config = CurveConfig::new()
            .with_funds(1)
            .with_freq(1)
            .with_return_unit(ReturnUnit::Growth);
        let out = compute_cumulative_returns(
            vec![1.0, 1.1, f64::NAN],
            vec![1.0, 1.0, 1.0],
            None,
            &config,
        )
        .unwrap();

        let curve = out.as_blended().unwrap();
        assert_relative_eq!(curve[1], 1.1, epsilon = 1e-12);
        assert_relative_eq!(curve[2], 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_geometry() {
        let err = compute_cumulative_returns(
            vec![0.0],
            vec![0.0],
            None,
            &CurveConfig::new().with_freq(0),
        )
        .unwrap_err();
        assert!(matches!(err, CurveError::InvalidParameter { .. }));
    }

    #[test]
    fn test_benchmark_length_checked() {
        let err = compute_cumulative_returns(
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            Some(&[0.0][..]),
            &CurveConfig::new().with_return_mean(false),
        )
        .unwrap_err();
        assert_eq!(err, CurveError::shape_mismatch("benchmark length", 2, 1));
    }
}
