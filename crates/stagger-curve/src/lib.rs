//! # Stagger Curve
//!
//! Smoothed cumulative return estimation for trading signals that are
//! re-evaluated more often than the strategy rebalances.
//!
//! Simulating one portfolio that fully re-enters on every rebalance date
//! gives a jagged curve dominated by entry timing. This crate instead splits
//! capital into staggered tranches, each trading on its own offset rebalance
//! calendar, and blends their curves.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Estimate, not simulation**: No costs, slippage or fill constraints;
//!   caller-supplied numbers are trusted
//! - **Best effort**: Missing values are substituted with neutral values,
//!   only structural problems are errors
//!
//! ## Quick Start
//!
//! ```rust
//! use stagger_curve::prelude::*;
//!
//! let returns = vec![0.0, 0.01, 0.02, -0.01, 0.0, 0.03];
//! let weights = vec![0.0, 1.0, 1.0, 1.0, 0.0, 0.0];
//!
//! let config = CurveConfig::new().with_funds(3).with_freq(3);
//! let curve = compute_cumulative_returns(returns, weights, None, &config)?;
//! assert_eq!(curve.len(), 6);
//! # Ok::<(), CurveError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`normalize`] - Cash column injection and missing-value sanitization
//! - [`tranche`] - Staggered held-weight schedules
//! - [`compound`] - Per-tranche value curves
//! - [`aggregate`] - Tranche blending and benchmark excess
//! - [`cumulative`] - The end-to-end estimator
//!
//! ## Feature Flags
//!
//! - `parallel`: Compound tranches with rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod compound;
pub mod config;
pub mod cumulative;
pub mod error;
pub mod input;
pub mod normalize;
pub mod parallel;
pub mod tranche;
pub mod unit;

// Re-export error types at crate root
pub use error::{CurveError, CurveResult};

// Re-export main types and functions
pub use aggregate::{aggregate, benchmark_growth, blend_tranches, CumulativeReturns};
pub use compound::{compound_tranche, period_growth};
pub use config::CurveConfig;
pub use cumulative::compute_cumulative_returns;
pub use input::IntoPeriodMatrix;
pub use normalize::{cash_weight, normalize, NormalizedInputs, CASH_COLUMN};
pub use parallel::maybe_parallel_map;
pub use tranche::{block_start, build_schedule, build_schedules, TrancheSchedule};
pub use unit::ReturnUnit;

/// Prelude module for convenient imports.
///
/// ```rust
/// use stagger_curve::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::CumulativeReturns;
    pub use crate::config::CurveConfig;
    pub use crate::cumulative::compute_cumulative_returns;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::input::IntoPeriodMatrix;
    pub use crate::unit::ReturnUnit;

    pub use nalgebra::{DMatrix, DVector};
}
