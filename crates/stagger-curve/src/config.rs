//! Parameters for cumulative return estimation.

use crate::error::{CurveError, CurveResult};
use crate::unit::ReturnUnit;
use serde::{Deserialize, Serialize};

/// Parameters for [`compute_cumulative_returns`](crate::compute_cumulative_returns).
///
/// Controls tranche geometry, blending, starting value, idle cash accrual and
/// parallelism. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Number of staggered tranches the capital is split into.
    pub funds: usize,

    /// Rebalance period length in rows.
    pub freq: usize,

    /// Blend tranches into one curve (true) or return one curve per tranche.
    pub return_mean: bool,

    /// Starting value of every tranche curve.
    pub init_cash: f64,

    /// Growth factor applied to the cash column each period (1.0 = no interest).
    pub risk_free: f64,

    /// Unit of the real-instrument returns.
    pub return_unit: ReturnUnit,

    /// Compound tranches in parallel (requires the 'parallel' feature).
    pub parallel: bool,

    /// Minimum tranche count to trigger parallel compounding.
    pub parallel_threshold: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            funds: 3,
            freq: 3,
            return_mean: true,
            init_cash: 1.0,
            risk_free: 1.0,
            return_unit: ReturnUnit::Simple,
            parallel: false,
            parallel_threshold: 8,
        }
    }
}

impl CurveConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of tranches.
    #[must_use]
    pub fn with_funds(mut self, funds: usize) -> Self {
        self.funds = funds;
        self
    }

    /// Sets the rebalance period length.
    #[must_use]
    pub fn with_freq(mut self, freq: usize) -> Self {
        self.freq = freq;
        self
    }

    /// Sets whether tranche curves are blended.
    #[must_use]
    pub fn with_return_mean(mut self, return_mean: bool) -> Self {
        self.return_mean = return_mean;
        self
    }

    /// Sets the starting value.
    #[must_use]
    pub fn with_init_cash(mut self, init_cash: f64) -> Self {
        self.init_cash = init_cash;
        self
    }

    /// Sets the cash growth factor.
    #[must_use]
    pub fn with_risk_free(mut self, risk_free: f64) -> Self {
        self.risk_free = risk_free;
        self
    }

    /// Sets the unit of the return matrix.
    #[must_use]
    pub fn with_return_unit(mut self, unit: ReturnUnit) -> Self {
        self.return_unit = unit;
        self
    }

    /// Sets whether to use parallel compounding.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel compounding.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Checks the tranche geometry.
    pub fn validate(&self) -> CurveResult<()> {
        if self.funds == 0 {
            return Err(CurveError::invalid_parameter(
                "funds",
                "at least one tranche is required",
            ));
        }
        if self.freq == 0 {
            return Err(CurveError::invalid_parameter(
                "freq",
                "rebalance period must be at least one row",
            ));
        }
        Ok(())
    }

    /// Returns true if parallel processing should be used for the given tranche count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}
