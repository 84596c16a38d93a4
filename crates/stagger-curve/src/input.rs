//! Conversion of caller data into period matrices.
//!
//! A period matrix has one row per period and one column per instrument.
//! One-dimensional inputs become a single-column matrix, so a `T`-vector and
//! the equivalent `T×1` matrix are interchangeable everywhere.

use crate::error::{CurveError, CurveResult};
use nalgebra::{DMatrix, DVector};

/// Trait for converting caller data into a `T×A` period matrix.
///
/// # Implementations
///
/// - `DMatrix<f64>` / `&DMatrix<f64>`: used as-is
/// - `DVector<f64>`, `Vec<f64>`, `&[f64]`: one instrument, `T×1`
/// - `Vec<Vec<f64>>`: row-major, one inner vector per period
pub trait IntoPeriodMatrix {
    /// Convert into a period matrix.
    fn into_period_matrix(self) -> CurveResult<DMatrix<f64>>;
}

impl IntoPeriodMatrix for DMatrix<f64> {
    fn into_period_matrix(self) -> CurveResult<DMatrix<f64>> {
        Ok(self)
    }
}

impl IntoPeriodMatrix for &DMatrix<f64> {
    fn into_period_matrix(self) -> CurveResult<DMatrix<f64>> {
        Ok(self.clone())
    }
}

impl IntoPeriodMatrix for DVector<f64> {
    fn into_period_matrix(self) -> CurveResult<DMatrix<f64>> {
        Ok(DMatrix::from_column_slice(self.len(), 1, self.as_slice()))
    }
}

impl IntoPeriodMatrix for Vec<f64> {
    fn into_period_matrix(self) -> CurveResult<DMatrix<f64>> {
        Ok(DMatrix::from_vec(self.len(), 1, self))
    }
}

impl IntoPeriodMatrix for &[f64] {
    fn into_period_matrix(self) -> CurveResult<DMatrix<f64>> {
        Ok(DMatrix::from_column_slice(self.len(), 1, self))
    }
}

impl IntoPeriodMatrix for Vec<Vec<f64>> {
    fn into_period_matrix(self) -> CurveResult<DMatrix<f64>> {
        let rows = self.len();
        let cols = self.first().map_or(0, Vec::len);

        for (row, values) in self.iter().enumerate() {
            if values.len() != cols {
                return Err(CurveError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
        }

        Ok(DMatrix::from_fn(rows, cols, |t, i| self[t][i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_becomes_single_column() {
        let m = vec![0.1, 0.2, 0.3].into_period_matrix().unwrap();
        assert_eq!(m.shape(), (3, 1));
        assert_eq!(m[(2, 0)], 0.3);
    }

    #[test]
    fn test_slice_and_dvector_match_vec() {
        let data = [0.1, -0.2, f64::NAN, 0.4];
        let from_slice = (&data[..]).into_period_matrix().unwrap();
        let from_vector = DVector::from_column_slice(&data)
            .into_period_matrix()
            .unwrap();

        assert_eq!(from_slice.shape(), (4, 1));
        assert_eq!(from_vector.shape(), (4, 1));
        assert_eq!(from_slice[(1, 0)], from_vector[(1, 0)]);
        assert!(from_slice[(2, 0)].is_nan());
    }

    #[test]
    fn test_row_major_rows() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]
            .into_period_matrix()
            .unwrap();

        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(2, 0)], 5.0);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = vec![vec![1.0, 2.0], vec![3.0]]
            .into_period_matrix()
            .unwrap_err();
        assert_eq!(
            err,
            CurveError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_rows() {
        let m = Vec::<Vec<f64>>::new().into_period_matrix().unwrap();
        assert_eq!(m.shape(), (0, 0));
    }
}
