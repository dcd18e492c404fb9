//! Dense row-major feature matrix.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};

/// Dense row-major matrix of `f64` features, one row per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Matrix of zeros.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        FeatureMatrix {
            n_rows,
            n_cols,
            data: vec![0.0; n_rows * n_cols],
        }
    }

    /// Build from row-major data.
    pub fn from_row_major(n_rows: usize, n_cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != n_rows * n_cols {
            return Err(TweetsieveError::invalid_argument(format!(
                "{} values cannot fill a {n_rows}x{n_cols} matrix",
                data.len()
            )));
        }
        Ok(FeatureMatrix {
            n_rows,
            n_cols,
            data,
        })
    }

    /// Build from rows that must all have `n_cols` values.
    pub fn from_rows(rows: Vec<Vec<f64>>, n_cols: usize) -> Result<Self> {
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(TweetsieveError::width_mismatch(
                    format!("row {i}"),
                    n_cols,
                    row.len(),
                ));
            }
            data.extend(row);
        }
        Ok(FeatureMatrix {
            n_rows,
            n_cols,
            data,
        })
    }

    /// Number of rows (documents).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns (features).
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Shape as `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Mutable row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows).map(move |i| self.row(i))
    }

    /// Value at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n_cols + j]
    }

    /// Row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Concatenate matrices column-wise. All blocks must have the same
    /// number of rows.
    pub fn hstack(blocks: &[&FeatureMatrix]) -> Result<Self> {
        let n_rows = blocks.first().map_or(0, |b| b.n_rows);
        for block in blocks {
            if block.n_rows != n_rows {
                return Err(TweetsieveError::invalid_argument(format!(
                    "cannot concatenate blocks with {} and {n_rows} rows",
                    block.n_rows
                )));
            }
        }

        let n_cols = blocks.iter().map(|b| b.n_cols).sum();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for i in 0..n_rows {
            for block in blocks {
                data.extend_from_slice(block.row(i));
            }
        }
        Ok(FeatureMatrix {
            n_rows,
            n_cols,
            data,
        })
    }

    /// New matrix holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.n_cols);
        for &i in indices {
            data.extend_from_slice(self.row(i));
        }
        FeatureMatrix {
            n_rows: indices.len(),
            n_cols: self.n_cols,
            data,
        }
    }

    /// New matrix holding the given columns, in the given order.
    pub fn select_columns(&self, columns: &[usize]) -> Self {
        let mut data = Vec::with_capacity(self.n_rows * columns.len());
        for row in self.rows() {
            data.extend(columns.iter().map(|&j| row[j]));
        }
        FeatureMatrix {
            n_rows: self.n_rows,
            n_cols: columns.len(),
            data,
        }
    }
}
