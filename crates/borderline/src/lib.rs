//! # borderline
//!
//! Numerically stable border bases for zero-dimensional polynomial ideals.
//!
//! This crate provides:
//! - Computational universes: bounded, extendable monomial sets in which
//!   all linear algebra happens
//! - A border basis factory that searches for a stable order ideal
//! - Normal forms modulo a border basis
//! - Multiplication matrices of the quotient ring
//! - Zeros of the ideal by simultaneous diagonalization
//!
//! ## Example
//!
//! ```
//! use borderline::{Basis, BorderBasisFactory};
//! use borderline_poly::{MonomialOrder, PolyRing};
//!
//! let ring = PolyRing::new(["x"], MonomialOrder::Grevlex);
//! let f = ring.poly(&[(1.0, &[3]), (-1.0, &[0])]);
//!
//! let basis = BorderBasisFactory::default().generate(&ring, &[f]).unwrap();
//! assert_eq!(basis.dimension(), 3);
//!
//! let zeros = basis.zeros().unwrap();
//! assert_eq!(zeros.len(), 3);
//! assert_eq!(zeros.real_points(1e-8).len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]

pub mod basis;
pub mod border_basis;
pub mod config;
pub mod error;
pub mod factory;
pub mod universe;

pub use basis::{Basis, ZeroSet};
pub use border_basis::BorderBasis;
pub use config::FactoryConfig;
pub use error::{BorderBasisError, Result};
pub use factory::{BorderBasisFactory, StabilizationStep};
pub use universe::{BorderBasedUniverse, ComputationalUniverse, DegreeBoundedUniverse};

pub use borderline_linalg::{DiagonalizationConfig, Tolerance};
