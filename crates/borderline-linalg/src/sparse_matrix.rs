//! Sparse matrix in Compressed Sparse Row (CSR) format.
//!
//! Coefficient matrices over a computational universe carry a handful of
//! non-zeros per row against thousands of monomial columns. They are built
//! from triplets, reduced row by row and read back row by row.

/// Sparse `f64` matrix in Compressed Sparse Row (CSR) format.
///
/// # Memory Layout
///
/// Row `i` holds the entries `row_ptrs[i]..row_ptrs[i + 1]` of `values` and
/// `col_indices`. Columns increase strictly within a row and explicit zeros
/// are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    values: Vec<f64>,
    col_indices: Vec<usize>,
    row_ptrs: Vec<usize>,
    num_cols: usize,
}

impl CsrMatrix {
    /// A matrix with no rows and `num_cols` columns.
    #[must_use]
    pub fn empty(num_cols: usize) -> Self {
        Self {
            values: Vec::new(),
            col_indices: Vec::new(),
            row_ptrs: vec![0],
            num_cols,
        }
    }

    /// Creates a sparse matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate entries are summed and entries that end up zero are
    /// dropped. Triplets may come in any order.
    ///
    /// # Panics
    ///
    /// Panics if a triplet lies outside `num_rows x num_cols`.
    #[must_use]
    pub fn from_triplets(num_rows: usize, num_cols: usize, triplets: &[(usize, usize, f64)]) -> Self {
        let mut sorted = triplets.to_vec();
        sorted.sort_by_key(|&(r, c, _)| (r, c));

        let mut out = Self::empty(num_cols);
        let mut entries: Vec<(usize, f64)> = Vec::new();
        let mut it = sorted.into_iter().peekable();
        for row in 0..num_rows {
            entries.clear();
            while let Some((_, col, val)) = it.next_if(|&(r, _, _)| r == row) {
                match entries.last_mut() {
                    Some((last, acc)) if *last == col => *acc += val,
                    _ => entries.push((col, val)),
                }
            }
            out.push_row(&entries);
        }
        assert!(it.next().is_none(), "triplet row out of range");
        out
    }

    /// Appends a row given as `(col, value)` pairs in increasing column
    /// order. Zero values are skipped.
    ///
    /// # Panics
    ///
    /// Panics if a column is out of range or columns do not increase.
    pub fn push_row(&mut self, entries: &[(usize, f64)]) {
        let start = self.col_indices.len();
        for &(col, val) in entries {
            assert!(col < self.num_cols, "column {col} out of range");
            if let Some(&prev) = self.col_indices[start..].last() {
                assert!(prev < col, "columns must increase within a row");
            }
            if val != 0.0 {
                self.values.push(val);
                self.col_indices.push(col);
            }
        }
        self.row_ptrs.push(self.values.len());
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.row_ptrs.len() - 1
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the non-zero entries of a row.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let (start, end) = (self.row_ptrs[row], self.row_ptrs[row + 1]);
        self.col_indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Column of the first non-zero entry of `row`.
    #[must_use]
    pub fn leading_col(&self, row: usize) -> Option<usize> {
        let (start, end) = (self.row_ptrs[row], self.row_ptrs[row + 1]);
        (start < end).then(|| self.col_indices[start])
    }

    /// Keeps only the rows whose index satisfies `keep`.
    #[must_use]
    pub fn filter_rows(&self, mut keep: impl FnMut(usize) -> bool) -> Self {
        let mut out = Self::empty(self.num_cols);
        for row in (0..self.num_rows()).filter(|&r| keep(r)) {
            let entries: Vec<(usize, f64)> = self.row_iter(row).collect();
            out.push_row(&entries);
        }
        out
    }
}

#[cfg(test)]
impl CsrMatrix {
    /// Creates a sparse matrix from dense rows of equal length.
    pub(crate) fn from_dense(rows: &[Vec<f64>]) -> Self {
        let num_cols = rows.first().map_or(0, Vec::len);
        let mut out = Self::empty(num_cols);
        for row in rows {
            let entries: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
            out.push_row(&entries);
        }
        out
    }

    /// Dense copy, one `Vec` per row.
    pub(crate) fn to_dense(&self) -> Vec<Vec<f64>> {
        (0..self.num_rows())
            .map(|row| {
                let mut dense = vec![0.0; self.num_cols];
                for (col, val) in self.row_iter(row) {
                    dense[col] = val;
                }
                dense
            })
            .collect()
    }
}
