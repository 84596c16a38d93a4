//! Config command implementation.
//!
//! Shows and creates run files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::config::RunConfig;
use crate::output::{print_header, print_info, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show(ShowArgs),

    /// Write a run file with default settings
    Init(InitArgs),
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Run file to show (defaults are shown without one)
    #[arg(short, long, env = "STAGGER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the run file
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show(show_args) => execute_show(show_args, format),
        ConfigCommand::Init(init_args) => execute_init(init_args),
    }
}

/// Show the effective configuration.
fn execute_show(args: ShowArgs, format: OutputFormat) -> Result<()> {
    let run = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    match format {
        OutputFormat::Table => {
            print_header("Effective Configuration");
            print_output(&settings(&run), format)?;
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&run)?);
        }
        OutputFormat::Csv => {
            print_output(&settings(&run), format)?;
        }
    }

    Ok(())
}

fn settings(run: &RunConfig) -> Vec<KeyValue> {
    let curve = &run.curve;
    let path = |p: &Option<PathBuf>| {
        p.as_ref()
            .map_or_else(|| "-".to_string(), |p| p.display().to_string())
    };

    vec![
        KeyValue::new("funds", curve.funds),
        KeyValue::new("freq", curve.freq),
        KeyValue::new("return_mean", curve.return_mean),
        KeyValue::new("init_cash", curve.init_cash),
        KeyValue::new("risk_free", curve.risk_free),
        KeyValue::new("return_unit", curve.return_unit),
        KeyValue::new("parallel", curve.parallel),
        KeyValue::new("parallel_threshold", curve.parallel_threshold),
        KeyValue::new("inputs.returns", path(&run.inputs.returns)),
        KeyValue::new("inputs.weights", path(&run.inputs.weights)),
        KeyValue::new("inputs.benchmark", path(&run.inputs.benchmark)),
    ]
}

/// Write a default run file.
fn execute_init(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "{} already exists. Use --force to overwrite.",
            args.path.display()
        ));
    }

    let content = RunConfig::default().to_toml()?;
    std::fs::write(&args.path, content)?;

    tracing::debug!(path = %args.path.display(), "wrote run file");
    print_success(&format!("Wrote {}", args.path.display()));
    print_info("Set [inputs] returns and weights before running `stagger curve`");
    Ok(())
}
