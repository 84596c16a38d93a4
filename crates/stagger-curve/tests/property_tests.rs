//! Property-based tests for estimator invariants.
//!
//! These tests verify properties that should hold for any input:
//! - A vector input behaves exactly like the equivalent single-column matrix
//! - Cash plus gross exposure is 1 for every normalized row
//! - Missing values never propagate into the output
//! - Blending equals the row mean of the per-tranche curves

use proptest::prelude::*;
use stagger_curve::prelude::*;
use stagger_curve::{normalize, CASH_COLUMN};

// =============================================================================
// STRATEGIES
// =============================================================================

/// A return cell: mostly small moves, sometimes missing.
fn return_cell() -> impl Strategy<Value = f64> {
    prop_oneof![
        9 => -0.1f64..0.1,
        1 => Just(f64::NAN),
    ]
}

/// A weight row over `instruments` columns whose gross exposure is at most 1.
fn weight_row(instruments: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-1.0f64..1.0, prop::bool::weighted(0.1)), instruments).prop_map(
        |cells| {
            let gross: f64 = cells.iter().map(|(w, _)| w.abs()).sum();
            let scale = if gross > 1.0 { gross } else { 1.0 };
            cells
                .into_iter()
                .map(|(w, missing)| if missing { f64::NAN } else { w / scale })
                .collect()
        },
    )
}

/// Matching return and weight matrices.
fn panel() -> impl Strategy<Value = (DMatrix<f64>, DMatrix<f64>)> {
    (1usize..30, 1usize..5).prop_flat_map(|(periods, instruments)| {
        (
            prop::collection::vec(return_cell(), periods * instruments),
            prop::collection::vec(weight_row(instruments), periods),
        )
            .prop_map(move |(returns, rows)| {
                let returns = DMatrix::from_row_slice(periods, instruments, &returns);
                let weights = DMatrix::from_fn(periods, instruments, |t, i| rows[t][i]);
                (returns, weights)
            })
    })
}

/// A single-instrument series.
fn series() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..40).prop_flat_map(|periods| {
        (
            prop::collection::vec(return_cell(), periods),
            prop::collection::vec(
                prop_oneof![9 => -1.0f64..1.0, 1 => Just(f64::NAN)],
                periods,
            ),
        )
    })
}

fn geometry() -> impl Strategy<Value = (usize, usize)> {
    (1usize..7, 1usize..7)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn property_vector_equals_single_column((returns, weights) in series(), (funds, freq) in geometry()) {
        let config = CurveConfig::new().with_funds(funds).with_freq(freq).with_return_mean(false);

        let from_vec = compute_cumulative_returns(&returns[..], &weights[..], None, &config).unwrap();
        let from_matrix = compute_cumulative_returns(
            DMatrix::from_column_slice(returns.len(), 1, &returns),
            DMatrix::from_column_slice(weights.len(), 1, &weights),
            None,
            &config,
        )
        .unwrap();

        prop_assert_eq!(from_vec, from_matrix);
    }

    #[test]
    fn property_cash_completes_every_row((returns, weights) in panel(), risk_free in 0.99f64..1.01) {
        let inputs = normalize(&returns, &weights, risk_free, ReturnUnit::Simple).unwrap();

        for t in 0..inputs.periods() {
            let cash = inputs.weights[(t, CASH_COLUMN)];
            let gross: f64 = (1..inputs.columns()).map(|j| inputs.weights[(t, j)].abs()).sum();
            prop_assert!((cash + gross - 1.0).abs() <= 1e-5 + 1e-12);
            prop_assert_eq!(inputs.returns[(t, CASH_COLUMN)], risk_free);
        }
    }

    #[test]
    fn property_no_missing_values_in_output(
        (returns, weights) in panel(),
        (funds, freq) in geometry(),
        growth in any::<bool>(),
    ) {
        let unit = if growth { ReturnUnit::Growth } else { ReturnUnit::Simple };
        let config = CurveConfig::new()
            .with_funds(funds)
            .with_freq(freq)
            .with_return_unit(unit)
            .with_return_mean(false);

        let out = compute_cumulative_returns(&returns, &weights, None, &config).unwrap();
        prop_assert!(out.into_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn property_blend_is_row_mean((returns, weights) in panel(), (funds, freq) in geometry()) {
        let config = CurveConfig::new().with_funds(funds).with_freq(freq);

        let raw = compute_cumulative_returns(
            &returns,
            &weights,
            None,
            &config.clone().with_return_mean(false),
        )
        .unwrap()
        .into_matrix();
        let blended = compute_cumulative_returns(&returns, &weights, None, &config).unwrap();
        let blended = blended.as_blended().unwrap();

        for t in 0..raw.nrows() {
            let mean = raw.row(t).iter().sum::<f64>() / raw.ncols() as f64;
            prop_assert_eq!(blended[t], mean);
        }
    }

    #[test]
    fn property_curves_start_at_init_cash(
        (returns, weights) in panel(),
        (funds, freq) in geometry(),
        init_cash in 0.5f64..1000.0,
    ) {
        let config = CurveConfig::new()
            .with_funds(funds)
            .with_freq(freq)
            .with_init_cash(init_cash)
            .with_return_mean(false);

        let curves = compute_cumulative_returns(&returns, &weights, None, &config)
            .unwrap()
            .into_matrix();
        for k in 0..funds {
            prop_assert_eq!(curves[(0, k)], init_cash);
        }
    }
}
