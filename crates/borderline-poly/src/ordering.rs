//! Monomial orderings.
//!
//! The ordering fixes which term of a polynomial is leading, and therefore
//! which monomials end up on the border of an order ideal.

use std::cmp::Ordering;
use std::fmt;

use crate::monomial::Monomial;

/// Term order used for leading monomials and column layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MonomialOrder {
    /// Pure lexicographic: x_0 dominates, then x_1, and so on. Not graded,
    /// so x_0 beats any power of x_1.
    Lex,

    /// Total degree first, ties broken lexicographically.
    Grlex,

    /// Total degree first, ties broken by the smaller exponent of the last
    /// variable that differs.
    #[default]
    Grevlex,
}

impl MonomialOrder {
    /// Compares `a` with `b` under this order.
    #[must_use]
    pub fn compare(&self, a: &Monomial, b: &Monomial) -> Ordering {
        match self {
            Self::Lex => a.cmp_lex(b),
            Self::Grlex => a.cmp_grlex(b),
            Self::Grevlex => a.cmp_grevlex(b),
        }
    }

    /// Sorts largest first, the column order of coefficient matrices.
    pub fn sort_descending(&self, monomials: &mut [Monomial]) {
        monomials.sort_by(|a, b| self.compare(b, a));
    }

    /// Sorts smallest first, the enumeration order of order ideals and
    /// borders.
    pub fn sort_ascending(&self, monomials: &mut [Monomial]) {
        monomials.sort_by(|a, b| self.compare(a, b));
    }

    /// True for orders that refine total degree.
    #[must_use]
    pub const fn is_degree_compatible(&self) -> bool {
        matches!(self, Self::Grlex | Self::Grevlex)
    }

    /// Lower-case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Lex => "lex",
            Self::Grlex => "grlex",
            Self::Grevlex => "grevlex",
        }
    }
}

impl fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
