//! Units of the return matrix.

use serde::{Deserialize, Serialize};

/// How entries of the return matrix are read.
///
/// The cash column is always a growth factor regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnUnit {
    /// Simple one-period returns (0.0 = flat).
    #[default]
    Simple,

    /// Growth factors (1.0 = flat).
    Growth,
}

impl ReturnUnit {
    /// The value that means "no observed move" in this unit.
    ///
    /// Missing returns are replaced with it.
    #[must_use]
    pub fn flat(self) -> f64 {
        match self {
            Self::Simple => 0.0,
            Self::Growth => 1.0,
        }
    }

    /// Converts an entry in this unit to a growth factor.
    #[inline]
    #[must_use]
    pub fn growth(self, value: f64) -> f64 {
        match self {
            Self::Simple => 1.0 + value,
            Self::Growth => value,
        }
    }

    /// Returns a human-readable name for the unit.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "Simple Return",
            Self::Growth => "Growth Factor",
        }
    }
}

impl std::fmt::Display for ReturnUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
