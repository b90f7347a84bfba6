//! Simultaneous diagonalization of commuting matrices.
//!
//! The multiplication matrices of a zero-dimensional quotient ring commute,
//! so they share eigenvectors. A random linear combination separates the
//! joint eigenvalues with probability one; its eigenvectors are then used to
//! read off every matrix's eigenvalue through a Rayleigh quotient.

use nalgebra::{DMatrix, DVector, Schur};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::dense_matrix::DenseMatrix;
use crate::error::LinalgError;
use crate::Complex64;

/// Configuration for [`simultaneously_diagonalize`].
#[derive(Clone, Debug)]
pub struct DiagonalizationConfig {
    /// Random seed for the combination weights.
    pub seed: u64,
    /// Inverse iteration steps per eigenvector.
    pub inverse_iterations: usize,
    /// Joint eigenvalues closer than this (max-norm) are merged.
    pub cluster_tolerance: f64,
    /// Iteration cap for the Schur decomposition.
    pub max_schur_iterations: usize,
}

impl Default for DiagonalizationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            inverse_iterations: 3,
            cluster_tolerance: 1e-6,
            max_schur_iterations: 10_000,
        }
    }
}

impl DiagonalizationConfig {
    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the merge tolerance for joint eigenvalues.
    #[must_use]
    pub fn with_cluster_tolerance(mut self, tol: f64) -> Self {
        self.cluster_tolerance = tol;
        self
    }
}

/// Joint eigenvalues of a commuting family.
#[derive(Clone, Debug, PartialEq)]
pub struct JointSpectrum {
    /// One entry per joint eigenvector; entry `i` of each point is the
    /// eigenvalue of the `i`-th input matrix.
    pub points: Vec<Vec<Complex64>>,
    /// Largest Frobenius norm of a pairwise commutator.
    pub commutator_residual: f64,
    /// Largest relative eigen-residual `|M v - lambda v| / |v|`.
    pub diagonalization_error: f64,
}

/// Simultaneously diagonalizes a family of commuting square matrices.
///
/// Points are sorted lexicographically by the real then imaginary parts of
/// their coordinates.
///
/// # Errors
///
/// - [`LinalgError::DimensionMismatch`] if the matrices are not all square
///   of the same size.
/// - [`LinalgError::NoConvergence`] if the Schur decomposition of the
///   combination does not converge.
/// - [`LinalgError::SingularShift`] if inverse iteration cannot factor a
///   shifted matrix.
pub fn simultaneously_diagonalize(
    matrices: &[DenseMatrix],
    config: &DiagonalizationConfig,
) -> Result<JointSpectrum, LinalgError> {
    let Some(first) = matrices.first() else {
        return Ok(JointSpectrum {
            points: Vec::new(),
            commutator_residual: 0.0,
            diagonalization_error: 0.0,
        });
    };
    let n = first.num_rows();
    for m in matrices {
        if !m.is_square() || m.num_rows() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                found: if m.num_rows() == n { m.num_cols() } else { m.num_rows() },
            });
        }
    }

    let commutator_residual = commutator_residual(matrices);
    if n == 0 {
        return Ok(JointSpectrum {
            points: Vec::new(),
            commutator_residual,
            diagonalization_error: 0.0,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut combination = DenseMatrix::zeros(n, n);
    for m in matrices {
        let weight: f64 = rng.gen_range(0.5..1.5);
        combination = &combination + &m.scale(weight);
    }

    let real = to_nalgebra(&combination);
    let schur = Schur::try_new(real.clone(), f64::EPSILON, config.max_schur_iterations).ok_or(
        LinalgError::NoConvergence {
            iterations: config.max_schur_iterations,
        },
    )?;
    let eigenvalues = schur.complex_eigenvalues();

    let complex = real.map(|v| Complex64::new(v, 0.0));
    let family: Vec<DMatrix<Complex64>> = matrices
        .iter()
        .map(|m| to_nalgebra(m).map(|v| Complex64::new(v, 0.0)))
        .collect();

    let mut points: Vec<Vec<Complex64>> = Vec::with_capacity(n);
    let mut diagonalization_error: f64 = 0.0;

    for &lambda in eigenvalues.iter() {
        let start = DVector::from_fn(n, |_, _| {
            Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
        });
        let v = inverse_iteration(&complex, lambda, start, config.inverse_iterations)?;

        let mut point = Vec::with_capacity(family.len());
        for m in &family {
            let mv = m * &v;
            let mu = v.dotc(&mv) / v.dotc(&v);
            let residual = (&mv - &v * mu).norm() / v.norm();
            diagonalization_error = diagonalization_error.max(residual);
            point.push(mu);
        }

        let duplicate = points.iter().any(|p| {
            p.iter()
                .zip(&point)
                .all(|(a, b)| (a - b).norm() <= config.cluster_tolerance)
        });
        if !duplicate {
            points.push(point);
        }
    }

    points.sort_by(|a, b| {
        a.iter()
            .zip(b)
            .map(|(x, y)| x.re.total_cmp(&y.re).then(x.im.total_cmp(&y.im)))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        points = points.len(),
        commutator_residual,
        diagonalization_error,
        "simultaneous diagonalization"
    );

    Ok(JointSpectrum {
        points,
        commutator_residual,
        diagonalization_error,
    })
}

/// Largest Frobenius norm of `AB - BA` over all pairs.
#[must_use]
pub fn commutator_residual(matrices: &[DenseMatrix]) -> f64 {
    let mut worst: f64 = 0.0;
    for (i, a) in matrices.iter().enumerate() {
        for b in &matrices[i + 1..] {
            worst = worst.max(a.commutator(b).frobenius_norm());
        }
    }
    worst
}

fn to_nalgebra(m: &DenseMatrix) -> DMatrix<f64> {
    DMatrix::from_row_slice(m.num_rows(), m.num_cols(), m.as_slice())
}

/// Eigenvector of `m` for the eigenvalue `lambda` by shifted inverse iteration.
fn inverse_iteration(
    m: &DMatrix<Complex64>,
    lambda: Complex64,
    start: DVector<Complex64>,
    iterations: usize,
) -> Result<DVector<Complex64>, LinalgError> {
    let n = m.nrows();
    // The exact eigenvalue makes the shifted matrix singular.
    let offset = 1e-10 * lambda.norm().max(1.0);
    let shift = lambda + Complex64::new(offset, offset);
    let lu = (m - DMatrix::from_diagonal_element(n, n, shift)).lu();

    let mut v = start;
    v.normalize_mut();
    for _ in 0..iterations.max(1) {
        v = lu
            .solve(&v)
            .ok_or(LinalgError::SingularShift { eigenvalue: lambda })?;
        let norm = v.normalize_mut();
        if !norm.is_finite() || norm == 0.0 {
            return Err(LinalgError::SingularShift { eigenvalue: lambda });
        }
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex64, re: f64, im: f64) -> bool {
        (a - Complex64::new(re, im)).norm() < 1e-8
    }

    #[test]
    fn test_diagonal_family() {
        let a = DenseMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 2.0]]);
        let b = DenseMatrix::from_rows(vec![vec![3.0, 0.0], vec![0.0, 4.0]]);

        let spec = simultaneously_diagonalize(&[a, b], &DiagonalizationConfig::default()).unwrap();

        assert_eq!(spec.points.len(), 2);
        assert!(close(spec.points[0][0], 1.0, 0.0));
        assert!(close(spec.points[0][1], 3.0, 0.0));
        assert!(close(spec.points[1][0], 2.0, 0.0));
        assert!(close(spec.points[1][1], 4.0, 0.0));
        assert_eq!(spec.commutator_residual, 0.0);
        assert!(spec.diagonalization_error < 1e-8);
    }

    #[test]
    fn test_companion_of_x2_minus_1() {
        let m = DenseMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let spec = simultaneously_diagonalize(&[m], &DiagonalizationConfig::default()).unwrap();

        assert_eq!(spec.points.len(), 2);
        assert!(close(spec.points[0][0], -1.0, 0.0));
        assert!(close(spec.points[1][0], 1.0, 0.0));
    }

    #[test]
    fn test_rotation_has_imaginary_spectrum() {
        let m = DenseMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]);
        let spec = simultaneously_diagonalize(&[m], &DiagonalizationConfig::default()).unwrap();

        assert_eq!(spec.points.len(), 2);
        assert!(spec.points.iter().any(|p| close(p[0], 0.0, 1.0)));
        assert!(spec.points.iter().any(|p| close(p[0], 0.0, -1.0)));
    }

    #[test]
    fn test_repeated_eigenvalue_is_merged() {
        // Jordan block: a double root with a single eigenvector.
        let m = DenseMatrix::from_rows(vec![vec![0.0, 0.0], vec![1.0, 0.0]]);
        let spec = simultaneously_diagonalize(&[m], &DiagonalizationConfig::default()).unwrap();

        assert_eq!(spec.points.len(), 1);
        assert!(spec.points[0][0].norm() < 1e-4);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = DenseMatrix::identity(2);
        let b = DenseMatrix::identity(3);

        let err = simultaneously_diagonalize(&[a, b], &DiagonalizationConfig::default()).unwrap_err();
        assert_eq!(err, LinalgError::DimensionMismatch { expected: 2, found: 3 });
    }

    #[test]
    fn test_commutator_residual_detects_noncommuting() {
        let a = DenseMatrix::from_rows(vec![vec![0.0, 1.0], vec![0.0, 0.0]]);
        let b = DenseMatrix::from_rows(vec![vec![0.0, 0.0], vec![1.0, 0.0]]);

        assert!((commutator_residual(&[a.clone(), b]) - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(commutator_residual(&[a]), 0.0);
    }

    #[test]
    fn test_empty_family() {
        let spec = simultaneously_diagonalize(&[], &DiagonalizationConfig::default()).unwrap();
        assert!(spec.points.is_empty());
    }
}
