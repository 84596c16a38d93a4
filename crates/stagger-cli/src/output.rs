//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints key-value rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// A labelled grid of curve values, one row per period.
#[derive(Debug, Clone)]
pub struct CurveTable {
    /// Header of the label column.
    pub label_header: String,
    /// Headers of the value columns.
    pub columns: Vec<String>,
    /// Row labels and values.
    pub rows: Vec<(String, Vec<f64>)>,
}

impl CurveTable {
    fn header(&self) -> Vec<String> {
        std::iter::once(self.label_header.clone())
            .chain(self.columns.iter().cloned())
            .collect()
    }
}

/// Prints a curve table in the requested format.
pub fn print_curve(curve: &CurveTable, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if curve.rows.is_empty() {
                println!("No results.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(curve.header());
            for (label, values) in &curve.rows {
                builder.push_record(
                    std::iter::once(label.clone()).chain(values.iter().map(|v| format!("{:.6}", v))),
                );
            }
            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
            println!("{}", table);
        }
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = curve
                .rows
                .iter()
                .map(|(label, values)| {
                    let mut row = serde_json::Map::new();
                    row.insert(curve.label_header.clone(), label.clone().into());
                    for (column, value) in curve.columns.iter().zip(values) {
                        row.insert(column.clone(), (*value).into());
                    }
                    serde_json::Value::Object(row)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(curve.header())?;
            for (label, values) in &curve.rows {
                wtr.write_record(
                    std::iter::once(label.clone()).chain(values.iter().map(|v| v.to_string())),
                )?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Setting")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
