//! CSV matrix loading.
//!
//! Files have a header row of column names. When the first header is `date`,
//! `period` or `index` (any case) that column is read as a row label instead
//! of a value. Empty cells and `NaN` are missing values.

use std::path::Path;

use stagger_curve::prelude::DMatrix;

use crate::error::{CliError, CliResult};

const LABEL_HEADERS: [&str; 3] = ["date", "period", "index"];

/// A numeric matrix read from CSV, with optional row labels.
#[derive(Debug, Clone)]
pub struct MatrixFile {
    /// Name of the label column, if the file has one.
    pub label_header: Option<String>,
    /// One label per row when the file has a label column.
    pub labels: Option<Vec<String>>,
    /// Value column headers.
    pub columns: Vec<String>,
    /// Values, rows = periods.
    pub values: DMatrix<f64>,
}

impl MatrixFile {
    /// Loads a matrix from a CSV file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        let matrix = Self::from_reader(reader, path)?;

        tracing::debug!(
            path = %path.display(),
            rows = matrix.rows(),
            columns = matrix.columns.len(),
            labelled = matrix.labels.is_some(),
            "loaded matrix"
        );
        Ok(matrix)
    }

    fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>, path: &Path) -> CliResult<Self> {
        let headers = reader.headers()?.clone();
        let labelled = headers
            .get(0)
            .is_some_and(|h| LABEL_HEADERS.contains(&h.to_ascii_lowercase().as_str()));
        let skip = usize::from(labelled);

        let columns: Vec<String> = headers.iter().skip(skip).map(str::to_string).collect();
        if columns.is_empty() {
            return Err(CliError::format(path, "no value columns"));
        }

        let mut labels = Vec::new();
        let mut cells = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if labelled {
                labels.push(record.get(0).unwrap_or_default().to_string());
            }
            for (column, value) in columns.iter().zip(record.iter().skip(skip)) {
                cells.push(parse_cell(value).ok_or_else(|| CliError::InvalidCell {
                    path: path.to_path_buf(),
                    row: row + 1,
                    column: column.clone(),
                    value: value.to_string(),
                })?);
            }
        }

        let rows = cells.len() / columns.len();
        Ok(Self {
            label_header: labelled.then(|| headers[0].to_string()),
            labels: labelled.then_some(labels),
            values: DMatrix::from_row_slice(rows, columns.len(), &cells),
            columns,
        })
    }

    /// Number of data rows.
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Reads the file as a single series, for benchmarks.
    pub fn into_series(self, path: &Path) -> CliResult<Vec<f64>> {
        if self.values.ncols() != 1 {
            return Err(CliError::format(
                path,
                format!("expected one value column, found {}", self.values.ncols()),
            ));
        }
        Ok(self.values.column(0).iter().copied().collect())
    }
}

/// Parses one cell; empty means missing.
fn parse_cell(value: &str) -> Option<f64> {
    if value.is_empty() {
        return Some(f64::NAN);
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> CliResult<MatrixFile> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        MatrixFile::from_reader(reader, Path::new("test.csv"))
    }

    #[test]
    fn test_plain_matrix() {
        let m = read("a,b\n0.1,0.2\n0.3,0.4\n").unwrap();
        assert!(m.labels.is_none());
        assert_eq!(m.columns, vec!["a", "b"]);
        assert_eq!(m.values[(1, 0)], 0.3);
        assert_eq!(m.values.shape(), (2, 2));
    }

    #[test]
    fn test_label_column() {
        let m = read("Date,x\n2024-01-01,1\n2024-01-02,2\n").unwrap();
        assert_eq!(m.label_header.as_deref(), Some("Date"));
        assert_eq!(m.labels.unwrap(), vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(m.columns, vec!["x"]);
    }

    #[test]
    fn test_missing_cells() {
        let m = read("a,b\n,NaN\n1,2\n").unwrap();
        assert!(m.values[(0, 0)].is_nan());
        assert!(m.values[(0, 1)].is_nan());
        assert_eq!(m.values[(1, 1)], 2.0);
    }

    #[test]
    fn test_bad_cell() {
        let err = read("a\n1\nabc\n").unwrap_err();
        assert!(matches!(err, CliError::InvalidCell { row: 2, .. }));
    }

    #[test]
    fn test_ragged_file() {
        assert!(matches!(read("a,b\n1,2\n3\n"), Err(CliError::Csv(_))));
    }

    #[test]
    fn test_header_only() {
        let m = read("a,b\n").unwrap();
        assert_eq!(m.values.shape(), (0, 2));
    }

    #[test]
    fn test_series() {
        let m = read("period,bench\n0,0.01\n1,0.02\n").unwrap();
        assert_eq!(m.into_series(Path::new("b.csv")).unwrap(), vec![0.01, 0.02]);

        let m = read("a,b\n1,2\n").unwrap();
        assert!(m.into_series(Path::new("b.csv")).is_err());
    }
}
