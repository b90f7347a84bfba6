//! Error types for the numeric primitives.

use thiserror::Error;

use crate::Complex64;

/// Errors raised by row reduction and diagonalization.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinalgError {
    /// A pivot candidate fell between the zero threshold and the rank gap,
    /// so the numerical rank cannot be decided.
    #[error("rank-ambiguous pivot {magnitude:e} in column {column} (delta = {delta:e})")]
    NumericInstability {
        /// Column in which the ambiguous pivot was found.
        column: usize,
        /// Magnitude of the best pivot candidate.
        magnitude: f64,
        /// Zero threshold in effect.
        delta: f64,
    },

    /// Operand shapes do not agree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension required by the operation.
        expected: usize,
        /// Dimension actually supplied.
        found: usize,
    },

    /// A row expected to carry a leading term is identically zero.
    #[error("row {0} is zero and has no leading term")]
    ZeroRow(usize),

    /// The Schur decomposition did not converge.
    #[error("eigenvalue iteration did not converge within {iterations} steps")]
    NoConvergence {
        /// Iteration cap that was reached.
        iterations: usize,
    },

    /// Inverse iteration could not factor the shifted matrix.
    #[error("shifted eigenproblem is singular near eigenvalue {eigenvalue}")]
    SingularShift {
        /// Eigenvalue used as the shift.
        eigenvalue: Complex64,
    },
}
