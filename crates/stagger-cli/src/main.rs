//! Stagger CLI - Command-line interface for staggered-tranche cumulative returns.
//!
//! # Usage
//!
//! ```bash
//! # Blended curve from CSV inputs
//! stagger curve --returns returns.csv --weights weights.csv
//!
//! # One curve per tranche, five tranches rebalancing every five rows
//! stagger curve --returns returns.csv --weights weights.csv --funds 5 --freq 5 --per-tranche
//!
//! # Excess over a benchmark, parameters from a run file
//! stagger curve --config run.toml --benchmark bench.csv --format json
//!
//! # Write a default run file
//! stagger config init run.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod matrix_file;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("stagger=debug,stagger_curve=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stagger=info"))
    };

    // Logs go to stderr; stdout carries only results
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Curve(args) => commands::curve::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}
