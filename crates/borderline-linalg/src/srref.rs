//! Stable reduced row echelon form.
//!
//! Sparse Gauss-Jordan elimination with partial pivoting and an explicit
//! zero threshold. Columns are processed left to right, so when columns are
//! laid out in descending monomial order the pivot of each row is the
//! leading monomial of the polynomial it represents.
//!
//! Rows are kept as sorted `(col, value)` lists. Unpivoted rows are bucketed
//! by their first column, so each column only looks at the rows that start
//! there; back substitution runs once at the end, last pivot first.

use std::collections::BTreeMap;

use crate::error::LinalgError;
use crate::sparse_matrix::CsrMatrix;

type SparseRow = Vec<(usize, f64)>;

/// Numerical thresholds for rank decisions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Magnitudes at or below this are zero.
    pub delta: f64,
    /// Pivots must exceed `delta * rank_gap`; anything between is ambiguous.
    pub rank_gap: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            delta: 1e-10,
            rank_gap: 1e2,
        }
    }
}

impl Tolerance {
    /// Creates a tolerance with the given zero threshold and default gap.
    #[must_use]
    pub fn new(delta: f64) -> Self {
        Self {
            delta,
            ..Self::default()
        }
    }

    /// Sets the rank gap.
    #[must_use]
    pub fn with_rank_gap(mut self, rank_gap: f64) -> Self {
        self.rank_gap = rank_gap;
        self
    }

    /// Smallest magnitude accepted as a pivot.
    #[must_use]
    pub fn pivot_floor(&self) -> f64 {
        self.delta * self.rank_gap
    }
}

/// Output of [`srref`].
#[derive(Clone, Debug, PartialEq)]
pub struct RowReduction {
    /// Non-zero rows in reduced row echelon form.
    pub matrix: CsrMatrix,
    /// Pivot column of each row, strictly increasing.
    pub pivots: Vec<usize>,
}

impl RowReduction {
    /// Numerical rank.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }
}

/// Computes the reduced row echelon form of `m` with tolerance `tol`.
///
/// Every input row is first scaled to unit max-norm so the zero threshold is
/// relative to the row it applies to. Output rows have pivot 1, zeros in all
/// other pivot columns and no entries of magnitude `tol.delta` or less.
///
/// # Errors
///
/// Returns [`LinalgError::NumericInstability`] if the best pivot candidate of
/// some column lies strictly between `tol.delta` and `tol.pivot_floor()`.
pub fn srref(m: &CsrMatrix, tol: &Tolerance) -> Result<RowReduction, LinalgError> {
    let num_cols = m.num_cols();

    let mut rows: Vec<SparseRow> = (0..m.num_rows())
        .map(|r| {
            let norm = m.row_iter(r).map(|(_, v)| v.abs()).fold(0.0, f64::max);
            let inv = 1.0 / norm;
            m.row_iter(r).map(|(c, v)| (c, v * inv)).collect()
        })
        .collect();

    let mut pending: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for r in 0..rows.len() {
        requeue(&mut pending, &rows, r);
    }

    let mut reduced: Vec<SparseRow> = Vec::new();
    let mut pivots = Vec::new();

    while let Some((col, candidates)) = pending.pop_first() {
        let (best, magnitude) = candidates
            .iter()
            .map(|&r| (r, rows[r][0].1.abs()))
            .fold((candidates[0], 0.0), |acc, cand| if cand.1 > acc.1 { cand } else { acc });

        if magnitude <= tol.delta {
            for r in candidates {
                rows[r].remove(0);
                requeue(&mut pending, &rows, r);
            }
            continue;
        }
        if magnitude < tol.pivot_floor() {
            return Err(LinalgError::NumericInstability {
                column: col,
                magnitude,
                delta: tol.delta,
            });
        }

        let mut pivot = std::mem::take(&mut rows[best]);
        let inv = 1.0 / pivot[0].1;
        for entry in &mut pivot {
            entry.1 *= inv;
        }
        pivot[0].1 = 1.0;

        for r in candidates.into_iter().filter(|&r| r != best) {
            let factor = rows[r][0].1;
            rows[r] = add_scaled(&rows[r], -factor, &pivot, col);
            requeue(&mut pending, &rows, r);
        }

        pivots.push(col);
        reduced.push(pivot);
    }

    let mut pivot_row = vec![None; num_cols];
    for (i, &p) in pivots.iter().enumerate() {
        pivot_row[p] = Some(i);
    }
    for i in (0..reduced.len()).rev() {
        let (head, tail) = reduced.split_at_mut(i + 1);
        let row = &mut head[i];
        // Rows below are already reduced and start at their own pivot, so
        // cancelling entry k leaves entries before k untouched.
        let mut k = 1;
        while k < row.len() {
            let (col, factor) = row[k];
            match pivot_row[col] {
                Some(j) => *row = add_scaled(row, -factor, &tail[j - i - 1], col),
                None => k += 1,
            }
        }
    }

    let mut matrix = CsrMatrix::empty(num_cols);
    for row in &reduced {
        let flushed: SparseRow = row.iter().copied().filter(|&(_, v)| v.abs() > tol.delta).collect();
        matrix.push_row(&flushed);
    }

    Ok(RowReduction { matrix, pivots })
}

/// Files row `r` under the column of its first entry.
fn requeue(pending: &mut BTreeMap<usize, Vec<usize>>, rows: &[SparseRow], r: usize) {
    if let Some(&(lead, _)) = rows[r].first() {
        pending.entry(lead).or_default().push(r);
    }
}

/// `row + scale * source`, with column `cancel` set to exactly zero.
fn add_scaled(row: &[(usize, f64)], scale: f64, source: &[(usize, f64)], cancel: usize) -> SparseRow {
    let mut out = Vec::with_capacity(row.len() + source.len());
    let (mut i, mut j) = (0, 0);
    loop {
        let (col, val) = match (row.get(i), source.get(j)) {
            (Some(&(a, x)), Some(&(b, y))) if a == b => {
                i += 1;
                j += 1;
                (a, x + y * scale)
            }
            (Some(&(a, x)), Some(&(b, _))) if a < b => {
                i += 1;
                (a, x)
            }
            (Some(&(a, x)), None) => {
                i += 1;
                (a, x)
            }
            (_, Some(&(b, y))) => {
                j += 1;
                (b, y * scale)
            }
            (None, None) => break,
        };
        if col != cancel && val != 0.0 {
            out.push((col, val));
        }
    }
    out
}

/// Scales every row so that its leading (first non-zero) entry is 1.
///
/// # Errors
///
/// Returns [`LinalgError::ZeroRow`] if a row has no non-zero entry.
pub fn lt_normalize(m: &CsrMatrix) -> Result<CsrMatrix, LinalgError> {
    let mut out = CsrMatrix::empty(m.num_cols());
    for row in 0..m.num_rows() {
        let mut entries: SparseRow = m.row_iter(row).collect();
        let inv = 1.0 / entries.first().ok_or(LinalgError::ZeroRow(row))?.1;
        for entry in &mut entries {
            entry.1 *= inv;
        }
        entries[0].1 = 1.0;
        out.push_row(&entries);
    }
    Ok(out)
}
