//! Curve command implementation.
//!
//! Loads return, weight and benchmark CSVs and prints the estimated curve.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use stagger_curve::prelude::*;

use crate::cli::OutputFormat;
use crate::config::RunConfig;
use crate::error::CliError;
use crate::matrix_file::MatrixFile;
use crate::output::{print_curve, CurveTable};

/// Arguments for the curve command.
#[derive(Args, Debug, Default)]
pub struct CurveArgs {
    /// Period return matrix (CSV)
    #[arg(short, long)]
    pub returns: Option<PathBuf>,

    /// Target weight matrix (CSV), already aligned to the exit period
    #[arg(short, long)]
    pub weights: Option<PathBuf>,

    /// Benchmark return series (CSV); the curve becomes excess over it
    #[arg(short, long)]
    pub benchmark: Option<PathBuf>,

    /// Run file (TOML); flags override its values
    #[arg(short, long, env = "STAGGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of staggered tranches
    #[arg(long)]
    pub funds: Option<usize>,

    /// Rebalance period length in rows
    #[arg(long)]
    pub freq: Option<usize>,

    /// Print one curve per tranche instead of the blend
    #[arg(long)]
    pub per_tranche: bool,

    /// Starting value of every tranche
    #[arg(long)]
    pub init_cash: Option<f64>,

    /// Per-period growth factor of idle cash (1.0 = no interest)
    #[arg(long)]
    pub risk_free: Option<f64>,

    /// Read returns as growth factors instead of simple returns
    #[arg(long)]
    pub growth: bool,
}

impl CurveArgs {
    /// Merges flags over the run file.
    fn effective_config(&self) -> Result<RunConfig> {
        let mut run = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        let curve = &mut run.curve;
        if let Some(funds) = self.funds {
            curve.funds = funds;
        }
        if let Some(freq) = self.freq {
            curve.freq = freq;
        }
        if let Some(init_cash) = self.init_cash {
            curve.init_cash = init_cash;
        }
        if let Some(risk_free) = self.risk_free {
            curve.risk_free = risk_free;
        }
        if self.per_tranche {
            curve.return_mean = false;
        }
        if self.growth {
            curve.return_unit = ReturnUnit::Growth;
        }

        let inputs = &mut run.inputs;
        if self.returns.is_some() {
            inputs.returns.clone_from(&self.returns);
        }
        if self.weights.is_some() {
            inputs.weights.clone_from(&self.weights);
        }
        if self.benchmark.is_some() {
            inputs.benchmark.clone_from(&self.benchmark);
        }

        Ok(run)
    }
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, format: OutputFormat) -> Result<()> {
    let run = args.effective_config()?;

    let returns_path = required(run.inputs.returns.as_deref(), "returns")?;
    let weights_path = required(run.inputs.weights.as_deref(), "weights")?;

    let returns = load(returns_path)?;
    let weights = load(weights_path)?;
    let benchmark = match run.inputs.benchmark.as_deref() {
        Some(path) => Some(load(path)?.into_series(path)?),
        None => None,
    };

    tracing::info!(
        periods = returns.rows(),
        instruments = returns.columns.len(),
        funds = run.curve.funds,
        freq = run.curve.freq,
        "estimating cumulative returns"
    );

    let curve = compute_cumulative_returns(
        &returns.values,
        &weights.values,
        benchmark.as_deref(),
        &run.curve,
    )?;

    let table = curve_table(&returns, &curve, benchmark.is_some());
    print_curve(&table, format)
}

fn required<'a>(path: Option<&'a Path>, name: &str) -> Result<&'a Path, CliError> {
    path.ok_or_else(|| CliError::MissingInput(name.to_string()))
}

fn load(path: &Path) -> Result<MatrixFile> {
    MatrixFile::load(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Lays the estimator output out against the return file's row labels.
fn curve_table(returns: &MatrixFile, curve: &CumulativeReturns, excess: bool) -> CurveTable {
    let (columns, values): (Vec<String>, DMatrix<f64>) = match curve {
        CumulativeReturns::Blended(v) => {
            let name = if excess { "excess" } else { "cumulative" };
            (vec![name.to_string()], DMatrix::from_column_slice(v.len(), 1, v.as_slice()))
        }
        CumulativeReturns::PerTranche(m) => (
            (0..m.ncols()).map(|k| format!("tranche_{}", k)).collect(),
            m.clone(),
        ),
    };

    let rows = (0..values.nrows())
        .map(|t| {
            let label = match &returns.labels {
                Some(labels) => labels[t].clone(),
                None => t.to_string(),
            };
            (label, values.row(t).iter().copied().collect())
        })
        .collect();

    CurveTable {
        label_header: returns
            .label_header
            .clone()
            .unwrap_or_else(|| "period".to_string()),
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlabelled(rows: usize) -> MatrixFile {
        MatrixFile {
            label_header: None,
            labels: None,
            columns: vec!["a".to_string()],
            values: DMatrix::zeros(rows, 1),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = CurveArgs {
            funds: Some(5),
            per_tranche: true,
            growth: true,
            returns: Some("r.csv".into()),
            ..Default::default()
        };
        let run = args.effective_config().unwrap();
        assert_eq!(run.curve.funds, 5);
        assert_eq!(run.curve.freq, 3);
        assert!(!run.curve.return_mean);
        assert_eq!(run.curve.return_unit, ReturnUnit::Growth);
        assert_eq!(run.inputs.returns, Some(PathBuf::from("r.csv")));
        assert_eq!(run.inputs.weights, None);
    }

    #[test]
    fn test_blended_table() {
        let curve = CumulativeReturns::Blended(DVector::from_vec(vec![1.0, 1.1]));
        let table = curve_table(&unlabelled(2), &curve, false);
        assert_eq!(table.label_header, "period");
        assert_eq!(table.columns, vec!["cumulative"]);
        assert_eq!(table.rows[1], ("1".to_string(), vec![1.1]));
    }

    #[test]
    fn test_per_tranche_table_uses_labels() {
        let mut returns = unlabelled(2);
        returns.label_header = Some("date".to_string());
        returns.labels = Some(vec!["d0".to_string(), "d1".to_string()]);

        let curve = CumulativeReturns::PerTranche(DMatrix::from_element(2, 3, 1.0));
        let table = curve_table(&returns, &curve, false);
        assert_eq!(table.columns, vec!["tranche_0", "tranche_1", "tranche_2"]);
        assert_eq!(table.rows[0].0, "d0");
        assert_eq!(table.rows[0].1.len(), 3);
    }

    #[test]
    fn test_missing_input() {
        let err = required(None, "weights").unwrap_err();
        assert!(err.to_string().contains("--weights"));
    }
}
