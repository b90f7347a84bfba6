//! Polynomial ring descriptions.

use crate::monomial::{Monomial, MAX_VARS};
use crate::ordering::MonomialOrder;
use crate::polynomial::Polynomial;

/// The ring R[x_0, ..., x_{n-1}] with named variables and a fixed order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyRing {
    names: Vec<String>,
    order: MonomialOrder,
}

impl PolyRing {
    /// Creates a ring over the named variables.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_VARS`] variables are requested.
    #[must_use]
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>, order: MonomialOrder) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        assert!(names.len() <= MAX_VARS, "at most {MAX_VARS} variables");
        Self { names, order }
    }

    /// Creates a ring with variables named x0, x1, ...
    #[must_use]
    pub fn with_vars(num_vars: usize, order: MonomialOrder) -> Self {
        Self::new((0..num_vars).map(|i| format!("x{i}")), order)
    }

    /// Returns the same ring under another monomial order.
    #[must_use]
    pub fn with_order(&self, order: MonomialOrder) -> Self {
        Self {
            names: self.names.clone(),
            order,
        }
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.names.len()
    }

    /// Returns the monomial order.
    #[must_use]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    /// Returns the variable names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the variable x_i as a polynomial.
    #[must_use]
    pub fn var(&self, i: usize) -> Polynomial {
        Polynomial::var(i, self.num_vars(), self.order)
    }

    /// Returns every variable as a polynomial, in index order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Polynomial> {
        (0..self.num_vars()).map(|i| self.var(i)).collect()
    }

    /// Returns the constant polynomial 1.
    #[must_use]
    pub fn one(&self) -> Polynomial {
        Polynomial::one(self.num_vars(), self.order)
    }

    /// Returns a constant polynomial.
    #[must_use]
    pub fn constant(&self, c: f64) -> Polynomial {
        Polynomial::constant(c, self.num_vars(), self.order)
    }

    /// Returns the monomial with the given exponents.
    ///
    /// # Panics
    ///
    /// Panics if the exponent count does not match the ring.
    #[must_use]
    pub fn monomial(&self, exps: &[u16]) -> Monomial {
        assert_eq!(exps.len(), self.num_vars(), "exponent count mismatch");
        Monomial::new(exps)
    }

    /// Builds a polynomial from (coefficient, exponents) pairs.
    #[must_use]
    pub fn poly(&self, terms: &[(f64, &[u16])]) -> Polynomial {
        Polynomial::new(
            terms
                .iter()
                .map(|(c, exps)| (self.monomial(exps), *c))
                .collect(),
            self.num_vars(),
            self.order,
        )
    }

    /// Formats a polynomial with this ring's variable names.
    #[must_use]
    pub fn display(&self, p: &Polynomial) -> String {
        p.display_with(&self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_construction() {
        let ring = PolyRing::new(["x", "y"], MonomialOrder::Grevlex);
        assert_eq!(ring.num_vars(), 2);
        assert_eq!(ring.symbols().len(), 2);

        let p = ring.poly(&[(1.0, &[2, 0]), (-1.0, &[0, 0])]);
        assert_eq!(ring.display(&p), "1*x^2 + -1");
        assert_eq!(p.order(), MonomialOrder::Grevlex);
    }

    #[test]
    fn test_with_order() {
        let ring = PolyRing::with_vars(3, MonomialOrder::Grevlex);
        let lex = ring.with_order(MonomialOrder::Lex);

        assert_eq!(lex.names(), ring.names());
        assert_eq!(lex.var(0).order(), MonomialOrder::Lex);
        assert_eq!(ring.names()[2], "x2");
    }
}
