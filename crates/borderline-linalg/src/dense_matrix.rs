//! Dense matrix implementation.
//!
//! Multiplication matrices of a quotient ring are square in its dimension
//! and mostly full, so they are stored row-major.

use std::ops::{Add, Index, IndexMut, Sub};

/// Dense `f64` matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Vec<f64>,
    num_rows: usize,
    num_cols: usize,
}

impl DenseMatrix {
    /// A `num_rows x num_cols` matrix of zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![0.0; num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a list of rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        let data: Vec<f64> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols, "ragged rows");
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// The `n x n` identity.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Row count.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Column count.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// True if rows and columns agree.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns the entries in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Overwrites column `col`.
    pub fn set_col(&mut self, col: usize, values: &[f64]) {
        assert_eq!(values.len(), self.num_rows);
        for (row, val) in values.iter().enumerate() {
            self[(row, col)] = *val;
        }
    }

    fn row(&self, row: usize) -> &[f64] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Matrix product `self * other`.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);

        let mut out = Self::zeros(self.num_rows, other.num_cols);
        for r in 0..self.num_rows {
            for (k, &a) in self.row(r).iter().enumerate().filter(|&(_, &a)| a != 0.0) {
                for (acc, &b) in out.row_mut(r).iter_mut().zip(other.row(k)) {
                    *acc += a * b;
                }
            }
        }
        out
    }

    /// Returns the commutator AB - BA.
    #[must_use]
    pub fn commutator(&self, other: &Self) -> Self {
        &self.mm(other) - &other.mm(self)
    }

    /// Copy with every entry multiplied by `scalar`.
    #[must_use]
    pub fn scale(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|v| v * scalar).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Frobenius norm.
    #[must_use]
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl Add for &DenseMatrix {
    type Output = DenseMatrix;

    fn add(self, other: Self) -> DenseMatrix {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl Sub for &DenseMatrix {
    type Output = DenseMatrix;

    fn sub(self, other: Self) -> DenseMatrix {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self.data.iter().zip(&other.data).map(|(a, b)| a - b).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}
