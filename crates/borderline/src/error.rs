//! Error types for border basis construction and use.

use borderline_linalg::LinalgError;
use thiserror::Error;

/// Errors that can occur while building or querying a border basis.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BorderBasisError {
    /// An input or intermediate object violates a structural requirement,
    /// e.g. a term outside the universe or a monomial with no border divisor.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// The universe was extended `extensions` times without reaching a
    /// fixed point. The ideal is most likely not zero-dimensional.
    #[error("no stable order ideal after {extensions} universe extensions ({universe_size} monomials)")]
    Convergence {
        /// Extensions spent.
        extensions: usize,
        /// Size of the last universe tried.
        universe_size: usize,
    },

    /// Row reduction could not decide a numerical rank. Always holds a
    /// [`LinalgError::NumericInstability`].
    #[error(transparent)]
    NumericInstability(LinalgError),

    /// Any other failure of the numeric primitives, e.g. a diagonalization
    /// that did not converge.
    #[error(transparent)]
    Linalg(LinalgError),
}

impl From<LinalgError> for BorderBasisError {
    fn from(err: LinalgError) -> Self {
        match err {
            LinalgError::NumericInstability { .. } => Self::NumericInstability(err),
            other => Self::Linalg(other),
        }
    }
}

impl BorderBasisError {
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionViolation(msg.into())
    }
}

/// Result alias for border basis operations.
pub type Result<T> = std::result::Result<T, BorderBasisError>;
