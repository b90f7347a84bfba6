//! Computational universes.
//!
//! A computational universe L is a finite set of monomials inside which all
//! vector-space computations of the border basis algorithm happen. A vector
//! space is represented as a sparse [`CsrMatrix`] whose columns are the
//! monomials of L in descending order, so row echelon pivots are leading
//! monomials.

mod border_based;
mod degree_bounded;

pub use border_based::BorderBasedUniverse;
pub use degree_bounded::DegreeBoundedUniverse;

use borderline_linalg::{srref, CsrMatrix, RowReduction, Tolerance};
use borderline_poly::{Monomial, MonomialOrder, PolyRing, Polynomial};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::error::{BorderBasisError, Result};

/// A bounded, extendable set of monomials.
pub trait ComputationalUniverse: Clone + std::fmt::Debug {
    /// The ring the monomials live in.
    fn ring(&self) -> &PolyRing;

    /// Tolerance for every row reduction performed in this universe.
    fn tolerance(&self) -> &Tolerance;

    /// The monomials of the universe, sorted descending.
    fn monomials(&self) -> &[Monomial];

    /// Checks membership.
    fn contains(&self, m: &Monomial) -> bool;

    /// Returns a strictly larger universe.
    #[must_use]
    fn extend(&self) -> Self;

    /// Number of monomials.
    fn len(&self) -> usize {
        self.monomials().len()
    }

    /// Returns true if the universe has no monomials.
    fn is_empty(&self) -> bool {
        self.monomials().is_empty()
    }

    /// Column index of `m`, if it belongs to the universe.
    fn index(&self, m: &Monomial) -> Option<usize> {
        let order = self.ring().order();
        self.monomials()
            .binary_search_by(|other| order.compare(m, other))
            .ok()
    }

    /// Returns `ms ∪ { x_i * m : m ∈ ms }`, sorted descending.
    fn closure(&self, ms: &[Monomial]) -> Vec<Monomial> {
        closure(ms, self.ring())
    }

    /// The border `{ x_i * o } \ O` of `order_ideal`, sorted ascending.
    fn border(&self, order_ideal: &[Monomial]) -> Vec<Monomial> {
        let inside: FxHashSet<Monomial> = order_ideal.iter().copied().collect();
        let mut border: Vec<Monomial> = closure(order_ideal, self.ring())
            .into_iter()
            .filter(|m| !inside.contains(m))
            .collect();
        self.ring().order().sort_ascending(&mut border);
        border
    }

    /// Coefficient matrix of `polys`, one row per polynomial.
    ///
    /// # Errors
    ///
    /// Fails with [`BorderBasisError::PreconditionViolation`] if a term lies
    /// outside the universe.
    fn vector_space(&self, polys: &[Polynomial]) -> Result<CsrMatrix> {
        let mut m = CsrMatrix::empty(self.len());
        for p in polys {
            let mut entries = Vec::with_capacity(p.len());
            for (mono, c) in p.terms() {
                let col = self.index(mono).ok_or_else(|| {
                    BorderBasisError::precondition(format!(
                        "monomial {} lies outside the computational universe",
                        mono.display_with(self.ring().names())
                    ))
                })?;
                entries.push((col, *c));
            }
            entries.sort_unstable_by_key(|&(col, _)| col);
            m.push_row(&entries);
        }
        Ok(m)
    }

    /// Reads the rows of `m` back as polynomials.
    fn as_polys(&self, m: &CsrMatrix) -> Vec<Polynomial> {
        let ring = self.ring();
        let monomials = self.monomials();
        (0..m.num_rows())
            .map(|row| {
                let terms = m.row_iter(row).map(|(col, c)| (monomials[col], c)).collect();
                Polynomial::new(terms, ring.num_vars(), ring.order())
            })
            .collect()
    }

    /// Row-reduces `m` with the universe tolerance.
    ///
    /// # Errors
    ///
    /// Propagates rank ambiguity from [`srref`].
    fn row_reduce(&self, m: &CsrMatrix) -> Result<RowReduction> {
        Ok(srref(m, self.tolerance())?)
    }

    /// The L-stable span of `v`: the smallest subspace of span(L) that
    /// contains `v` and every `x_i * w` which still lies in span(L).
    ///
    /// The result is in reduced row echelon form.
    ///
    /// # Errors
    ///
    /// Propagates rank ambiguity from row reduction.
    fn stable_extension(&self, v: &CsrMatrix) -> Result<CsrMatrix> {
        let ring = self.ring();
        let inner = self.monomials();

        // Monomials of L+ outside L come first so that a pivot in L means
        // the whole row is supported on L.
        let mut outside: Vec<Monomial> = closure(inner, ring)
            .into_iter()
            .filter(|m| !self.contains(m))
            .collect();
        ring.order().sort_descending(&mut outside);
        let offset = outside.len();
        let layout = ColumnLayout::new(outside.into_iter().chain(inner.iter().copied()).collect());

        let mut current = self.row_reduce(v)?.matrix;
        let mut round = 0usize;
        loop {
            let mut triplets = Vec::with_capacity(current.nnz() * (ring.num_vars() + 1));
            let mut num_rows = 0;
            for row in 0..current.num_rows() {
                triplets.extend(current.row_iter(row).map(|(col, c)| (num_rows, offset + col, c)));
                num_rows += 1;

                for var in 0..ring.num_vars() {
                    for (col, c) in current.row_iter(row) {
                        let shifted = layout.column(&inner[col].mul_var(var)).ok_or_else(|| {
                            BorderBasisError::precondition("universe closure is incomplete")
                        })?;
                        triplets.push((num_rows, shifted, c));
                    }
                    num_rows += 1;
                }
            }

            let stacked = CsrMatrix::from_triplets(num_rows, layout.len(), &triplets);
            let reduced = self.row_reduce(&stacked)?;
            let mut kept = CsrMatrix::empty(inner.len());
            for (row, &pivot) in reduced.pivots.iter().enumerate() {
                if pivot >= offset {
                    let entries: Vec<(usize, f64)> =
                        reduced.matrix.row_iter(row).map(|(col, c)| (col - offset, c)).collect();
                    kept.push_row(&entries);
                }
            }

            round += 1;
            trace!(
                round,
                before = current.num_rows(),
                after = kept.num_rows(),
                nnz = kept.nnz(),
                "stable extension round"
            );

            if kept.num_rows() <= current.num_rows() {
                return Ok(current);
            }
            current = kept;
        }
    }

    /// Monomials of L that are not leading monomials of the reduced space
    /// `v`, sorted ascending.
    fn supplementary_space(&self, v: &CsrMatrix) -> Vec<Monomial> {
        let leading: FxHashSet<usize> = (0..v.num_rows()).filter_map(|row| v.leading_col(row)).collect();
        let mut out: Vec<Monomial> = self
            .monomials()
            .iter()
            .enumerate()
            .filter(|(col, _)| !leading.contains(col))
            .map(|(_, m)| *m)
            .collect();
        self.ring().order().sort_ascending(&mut out);
        out
    }

    /// Checks `B ∪ { x_i * b } ⊆ L`.
    fn contains_extension(&self, b: &[Monomial]) -> bool {
        closure(b, self.ring()).iter().all(|m| self.contains(m))
    }
}

/// Checks that every divisor of every monomial in `ms` is in `ms`.
#[must_use]
pub fn is_order_ideal(ms: &[Monomial]) -> bool {
    let set: FxHashSet<Monomial> = ms.iter().copied().collect();
    ms.iter().all(|m| {
        (0..m.num_vars())
            .filter(|&i| m.exponent(i) > 0)
            .all(|i| m.div(&Monomial::var(i, m.num_vars())).is_some_and(|d| set.contains(&d)))
    })
}

fn closure(ms: &[Monomial], ring: &PolyRing) -> Vec<Monomial> {
    let mut seen: FxHashSet<Monomial> = FxHashSet::default();
    let mut out = Vec::new();
    for m in ms {
        for candidate in std::iter::once(*m).chain((0..ring.num_vars()).map(|i| m.mul_var(i))) {
            if seen.insert(candidate) {
                out.push(candidate);
            }
        }
    }
    ring.order().sort_descending(&mut out);
    out
}

/// Sorts and deduplicates monomials descending.
pub(crate) fn sorted_descending(ms: impl IntoIterator<Item = Monomial>, order: MonomialOrder) -> Vec<Monomial> {
    let set: FxHashSet<Monomial> = ms.into_iter().collect();
    let mut out: Vec<Monomial> = set.into_iter().collect();
    order.sort_descending(&mut out);
    out
}

/// Column order of a coefficient matrix with a monomial -> column map.
#[derive(Clone, Debug)]
struct ColumnLayout {
    columns: Vec<Monomial>,
    index: FxHashMap<Monomial, usize>,
}

impl ColumnLayout {
    fn new(columns: Vec<Monomial>) -> Self {
        let index = columns.iter().enumerate().map(|(col, m)| (*m, col)).collect();
        Self { columns, index }
    }

    fn len(&self) -> usize {
        self.columns.len()
    }

    fn column(&self, m: &Monomial) -> Option<usize> {
        self.index.get(m).copied()
    }
}
