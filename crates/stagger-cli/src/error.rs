//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A required input path was given neither as a flag nor in the run file.
    #[error("Missing required input: {0}. Pass --{0} or set it under [inputs].")]
    MissingInput(String),

    /// A CSV cell is not a number.
    #[error("{}: row {row}, column '{column}': cannot parse '{value}' as a number", path.display())]
    InvalidCell {
        /// File being read.
        path: PathBuf,
        /// 1-based data row.
        row: usize,
        /// Column header.
        column: String,
        /// Offending cell text.
        value: String,
    },

    /// A CSV file has an unusable layout.
    #[error("{}: {reason}", path.display())]
    Format {
        /// File being read.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Creates a format error for a file.
    #[must_use]
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
