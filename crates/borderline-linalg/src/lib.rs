//! # borderline-linalg
//!
//! Floating-point linear algebra for numerical border bases.
//!
//! This crate provides:
//! - Sparse CSR matrices for coefficient spaces over monomials
//! - Row-major dense matrices for multiplication matrices
//! - Sparse stable reduced row echelon form with an explicit rank gap
//! - Leading-term normalization of echelon rows
//! - Simultaneous diagonalization of commuting matrix families

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

pub mod dense_matrix;
pub mod diagonalize;
pub mod error;
pub mod sparse_matrix;
pub mod srref;

pub use dense_matrix::DenseMatrix;
pub use diagonalize::{commutator_residual, simultaneously_diagonalize, DiagonalizationConfig, JointSpectrum};
pub use error::LinalgError;
pub use sparse_matrix::CsrMatrix;
pub use srref::{lt_normalize, srref, RowReduction, Tolerance};

/// Double-precision complex number.
pub type Complex64 = nalgebra::Complex<f64>;

#[cfg(test)]
mod tests;
