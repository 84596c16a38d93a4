//! Run file configuration.
//!
//! A run file is TOML with a `[curve]` table of estimator parameters and an
//! `[inputs]` table of CSV paths:
//!
//! ```toml
//! [curve]
//! funds = 5
//! freq = 5
//!
//! [inputs]
//! returns = "returns.csv"
//! weights = "weights.csv"
//! ```
//!
//! Relative input paths are resolved against the run file's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stagger_curve::CurveConfig;

use crate::error::{CliError, CliResult};

/// Contents of a run file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Estimator parameters.
    pub curve: CurveConfig,
    /// Input file locations.
    pub inputs: InputPaths,
}

/// CSV input locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPaths {
    /// Period return matrix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<PathBuf>,
    /// Target weight matrix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<PathBuf>,
    /// Benchmark return series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<PathBuf>,
}

impl RunConfig {
    /// Loads a run file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;

        if let Some(dir) = path.parent() {
            config.inputs.resolve_against(dir);
        }
        Ok(config)
    }

    /// Renders the config as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

impl InputPaths {
    fn resolve_against(&mut self, dir: &Path) {
        for path in [&mut self.returns, &mut self.weights, &mut self.benchmark]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}
