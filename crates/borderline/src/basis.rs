//! Bases of zero-dimensional ideals and what can be derived from them.
//!
//! Everything here only needs a way to compute normal forms modulo the ideal
//! and a monomial basis O of the quotient ring. Multiplication by f in R/I
//! is the linear map whose j-th column is the normal form of f * O_j in
//! coordinates over O. These maps commute, and their joint eigenvalues are
//! the zeros of the ideal.

use borderline_linalg::{simultaneously_diagonalize, Complex64, DenseMatrix, DiagonalizationConfig, Tolerance};
use borderline_poly::{Monomial, PolyRing, Polynomial};

use crate::error::Result;

/// A basis of a zero-dimensional ideal with a monomial quotient basis.
pub trait Basis {
    /// The ambient ring.
    fn ring(&self) -> &PolyRing;

    /// The generators of the ideal.
    fn generators(&self) -> &[Polynomial];

    /// Monomial basis of the quotient ring, sorted ascending.
    fn quotient_basis(&self) -> &[Monomial];

    /// Tolerance below which coefficients are zero.
    fn tolerance(&self) -> &Tolerance;

    /// Reduces `f` modulo the ideal to a polynomial supported on the
    /// quotient basis.
    ///
    /// # Errors
    ///
    /// Implementation specific; see [`BorderBasis`](crate::BorderBasis).
    fn quotient(&self, f: &Polynomial) -> Result<Polynomial>;

    /// Dimension of the quotient ring.
    fn dimension(&self) -> usize {
        self.quotient_basis().len()
    }

    /// Coordinates of the normal form of `f` over the quotient basis.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Basis::quotient`].
    fn normal_form_coordinates(&self, f: &Polynomial) -> Result<Vec<f64>> {
        let nf = self.quotient(f)?;
        Ok(self.quotient_basis().iter().map(|o| nf.coeff(o)).collect())
    }

    /// Matrix of multiplication by `f` on the quotient ring.
    ///
    /// Column `j` holds the coordinates of the normal form of `f * O_j`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Basis::quotient`].
    fn multiplication_matrix(&self, f: &Polynomial) -> Result<DenseMatrix> {
        let f = f.with_order(self.ring().order());
        let n = self.dimension();
        let mut m = DenseMatrix::zeros(n, n);
        for (j, o) in self.quotient_basis().iter().enumerate() {
            let column = self.normal_form_coordinates(&f.mul_monomial(o, 1.0))?;
            m.set_col(j, &column);
        }
        Ok(m)
    }

    /// Multiplication matrices of the ring variables, in variable order.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Basis::quotient`].
    fn formal_multiplication_matrices(&self) -> Result<Vec<DenseMatrix>> {
        self.ring()
            .symbols()
            .iter()
            .map(|x| self.multiplication_matrix(x))
            .collect()
    }

    /// Checks ideal membership: the normal form vanishes within tolerance.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Basis::quotient`].
    fn contains(&self, f: &Polynomial) -> Result<bool> {
        Ok(self.quotient(f)?.max_norm() <= self.tolerance().pivot_floor())
    }

    /// Zeros of the ideal with the default diagonalization settings.
    ///
    /// # Errors
    ///
    /// See [`Basis::zeros_with`].
    fn zeros(&self) -> Result<ZeroSet> {
        self.zeros_with(&DiagonalizationConfig::default())
    }

    /// Zeros of the ideal by simultaneous diagonalization of the
    /// multiplication matrices.
    ///
    /// # Errors
    ///
    /// Propagates normal form failures and diagonalization failures.
    fn zeros_with(&self, config: &DiagonalizationConfig) -> Result<ZeroSet> {
        let matrices = self.formal_multiplication_matrices()?;
        let spectrum = simultaneously_diagonalize(&matrices, config)?;
        Ok(ZeroSet {
            points: spectrum.points,
            commutator_residual: spectrum.commutator_residual,
            diagonalization_error: spectrum.diagonalization_error,
        })
    }
}

/// Common zeros of an ideal, with quality indicators.
#[derive(Clone, Debug, PartialEq)]
pub struct ZeroSet {
    /// One complex point per zero, coordinates in variable order.
    pub points: Vec<Vec<Complex64>>,
    /// Largest Frobenius norm of a pairwise commutator of the
    /// multiplication matrices. Near zero for a consistent basis.
    pub commutator_residual: f64,
    /// Largest relative eigen-residual of the recovered eigenvectors.
    pub diagonalization_error: f64,
}

impl ZeroSet {
    /// Number of distinct zeros.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no zeros.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Real parts of the points whose imaginary parts are all within `tol`.
    #[must_use]
    pub fn real_points(&self, tol: f64) -> Vec<Vec<f64>> {
        self.points
            .iter()
            .filter(|p| p.iter().all(|z| z.im.abs() <= tol))
            .map(|p| p.iter().map(|z| z.re).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_points() {
        let zeros = ZeroSet {
            points: vec![
                vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, 1e-12)],
                vec![Complex64::new(0.0, 1.0), Complex64::new(1.0, 0.0)],
            ],
            commutator_residual: 0.0,
            diagonalization_error: 0.0,
        };

        assert_eq!(zeros.len(), 2);
        assert_eq!(zeros.real_points(1e-9), vec![vec![1.0, 2.0]]);
        assert_eq!(zeros.real_points(2.0).len(), 2);
    }
}
