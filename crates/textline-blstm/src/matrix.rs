//! Row-major 2-D storage carrying its own shape.
//!
//! Weight matrices and hidden-state streams are flat `Vec<f32>` buffers; this
//! type pins the `(rows, cols)` shape to the buffer so indexing invariants
//! are enforced at construction instead of by pointer-arithmetic convention.

use crate::error::{NetworkError, NetworkResult};

/// Row-major matrix of `f32` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Wrap a flat buffer as a `rows x cols` matrix.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::DimensionMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(
        what: &'static str,
        rows: usize,
        cols: usize,
        data: Vec<f32>,
    ) -> NetworkResult<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                what,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// All-zero matrix of the given shape.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// One row as a slice; panics if `row >= rows` (caller contract).
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// The backing buffer, row-major.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_validates_element_count() {
        let err = Matrix::from_vec("test weights", 2, 3, vec![0.0; 5]).unwrap_err();
        match err {
            NetworkError::DimensionMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn row_returns_the_right_slice() {
        let m = Matrix::from_vec("test", 2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn zeros_has_requested_shape() {
        let m = Matrix::zeros(3, 4);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }
}
