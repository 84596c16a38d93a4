//! Error types for cumulative return estimation.
//!
//! Only structural problems are errors. Degenerate numbers (missing returns,
//! missing weights, pathological growth factors) are substituted or passed
//! through and never raised.

use thiserror::Error;

/// Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur while estimating a cumulative return curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Two inputs disagree on a dimension.
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// The dimension that disagrees (e.g. "weights rows").
        what: String,
        /// The size implied by the reference input.
        expected: usize,
        /// The size that was supplied.
        actual: usize,
    },

    /// A row-major input has rows of differing length.
    #[error("Ragged input: row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// A tranche geometry parameter is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl CurveError {
    /// Create a shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
