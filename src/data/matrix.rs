//! # Dense Row-Major Matrix
//!
//! Flat row-major storage for floating-point matrices. Rows are contiguous,
//! so a range of row indices maps to one contiguous sub-slice of the backing
//! buffer, which is what lets the map engine hand disjoint row blocks to
//! concurrent leaf tasks without locking.

use crate::error::{ParvecError, Result};

/// Dense row-major matrix of `f64` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    /// Backing buffer, `rows * cols` elements, row-major
    data: Vec<f64>,

    /// Number of rows
    rows: usize,

    /// Number of columns
    cols: usize,
}

impl Matrix {
    /// Create a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a matrix from a flat row-major buffer.
    ///
    /// Fails with `DimensionMismatch` when the buffer length does not equal
    /// `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(ParvecError::dimension_mismatch(format!(
                "buffer of length {} cannot back a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from nested rows, validating rectangularity.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(ParvecError::dimension_mismatch(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total element count
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the matrix holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow row `r` as a contiguous slice
    #[inline]
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Element at (`r`, `c`)
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    /// Borrow the whole backing buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutably borrow the whole backing buffer
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Return the transpose as a new matrix.
    ///
    /// Matrix multiplication transposes the right operand once up front so
    /// that every leaf dot product runs over two contiguous rows.
    pub fn transposed(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        out
    }

    /// True when `self` and `other` have identical dimensions
    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}
