//! # borderline-poly
//!
//! Polynomial building blocks for numerical border bases.
//!
//! This crate provides:
//! - Packed monomials with divisibility and exponent-difference queries
//! - Lex, graded lex and graded reverse lex monomial orders
//! - Sparse multivariate polynomials with `f64` coefficients
//! - Polynomial ring descriptions with named variables

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

pub mod monomial;
pub mod ordering;
pub mod polynomial;
pub mod ring;

#[cfg(test)]
mod proptests;

pub use monomial::{ExponentDiff, Monomial, MAX_VARS};
pub use ordering::MonomialOrder;
pub use polynomial::Polynomial;
pub use ring::PolyRing;
