//! Sparse multivariate polynomials with floating-point coefficients.
//!
//! This is the polynomial abstraction the border basis algorithms work with:
//! a sparse map from monomial to `f64` whose leading monomial and leading
//! coefficient are well defined under a fixed monomial order.

use std::cmp::Ordering;

use crate::monomial::Monomial;
use crate::ordering::MonomialOrder;

/// Cancellations within this many ulps of the operands are treated as exact.
const CANCELLATION_ULPS: f64 = 4.0;

/// A sparse multivariate polynomial over `f64`.
///
/// Terms are stored as (monomial, coefficient) pairs sorted descending by the
/// monomial ordering, so the first term is the leading term. Zero
/// coefficients are never stored.
#[derive(Clone, PartialEq, Debug)]
pub struct Polynomial {
    /// Terms in descending order.
    terms: Vec<(Monomial, f64)>,
    /// Number of variables.
    num_vars: usize,
    /// Monomial ordering used for sorting.
    order: MonomialOrder,
}

impl Polynomial {
    /// Creates a new polynomial from terms.
    ///
    /// Terms are sorted and like terms combined.
    #[must_use]
    pub fn new(terms: Vec<(Monomial, f64)>, num_vars: usize, order: MonomialOrder) -> Self {
        let mut poly = Self {
            terms,
            num_vars,
            order,
        };
        poly.normalize();
        poly
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero(num_vars: usize, order: MonomialOrder) -> Self {
        Self {
            terms: Vec::new(),
            num_vars,
            order,
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one(num_vars: usize, order: MonomialOrder) -> Self {
        Self::constant(1.0, num_vars, order)
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: f64, num_vars: usize, order: MonomialOrder) -> Self {
        Self::from_monomial(Monomial::one(num_vars), c, order)
    }

    /// Creates the single term c * m.
    #[must_use]
    pub fn from_monomial(m: Monomial, c: f64, order: MonomialOrder) -> Self {
        let num_vars = m.num_vars();
        if c == 0.0 {
            return Self::zero(num_vars, order);
        }
        Self {
            terms: vec![(m, c)],
            num_vars,
            order,
        }
    }

    /// Creates a single variable x_i.
    #[must_use]
    pub fn var(i: usize, num_vars: usize, order: MonomialOrder) -> Self {
        Self::from_monomial(Monomial::var(i, num_vars), 1.0, order)
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Returns the monomial ordering.
    #[must_use]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    /// Returns the terms, leading term first.
    #[must_use]
    pub fn terms(&self) -> &[(Monomial, f64)] {
        &self.terms
    }

    /// Iterates over the monomials in the support, leading monomial first.
    pub fn monomials(&self) -> impl Iterator<Item = &Monomial> + '_ {
        self.terms.iter().map(|(m, _)| m)
    }

    /// Returns the leading monomial.
    #[must_use]
    pub fn leading_monomial(&self) -> Option<&Monomial> {
        self.terms.first().map(|(m, _)| m)
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<f64> {
        self.terms.first().map(|(_, c)| *c)
    }

    /// Returns the leading term (monomial, coefficient).
    #[must_use]
    pub fn leading_term(&self) -> Option<&(Monomial, f64)> {
        self.terms.first()
    }

    /// Returns the coefficient of `m` (zero if absent).
    #[must_use]
    pub fn coeff(&self, m: &Monomial) -> f64 {
        self.terms
            .binary_search_by(|(t, _)| self.order.compare(m, t))
            .map_or(0.0, |i| self.terms[i].1)
    }

    /// Returns the largest absolute coefficient.
    #[must_use]
    pub fn max_norm(&self) -> f64 {
        self.terms.iter().map(|(_, c)| c.abs()).fold(0.0, f64::max)
    }

    /// Returns true if every monomial in the support satisfies `pred`.
    pub fn is_supported_on(&self, pred: impl Fn(&Monomial) -> bool) -> bool {
        self.terms.iter().all(|(m, _)| pred(m))
    }

    /// Sorts terms and combines like terms.
    fn normalize(&mut self) {
        let order = self.order;
        self.terms.sort_by(|a, b| order.compare(&b.0, &a.0));

        let mut combined: Vec<(Monomial, f64)> = Vec::with_capacity(self.terms.len());
        for (m, c) in self.terms.drain(..) {
            match combined.last_mut() {
                Some((last, acc)) if *last == m => *acc += c,
                _ => combined.push((m, c)),
            }
        }
        combined.retain(|(_, c)| *c != 0.0);
        self.terms = combined;
    }

    /// Re-sorts the polynomial under another monomial order.
    #[must_use]
    pub fn with_order(&self, order: MonomialOrder) -> Self {
        if order == self.order {
            return self.clone();
        }
        Self::new(self.terms.clone(), self.num_vars, order)
    }

    /// Drops every term whose coefficient is at most `tol` in magnitude.
    pub fn prune(&mut self, tol: f64) {
        self.terms.retain(|(_, c)| c.abs() > tol);
    }

    /// Computes `self - c * shift * g` in place.
    ///
    /// Both operands are sorted, and multiplying by a monomial preserves the
    /// order, so this is a single merge pass. Coefficients that cancel to
    /// within rounding are removed, so eliminating a leading term leaves no
    /// residue behind.
    pub fn sub_scaled_shifted(&mut self, c: f64, shift: &Monomial, g: &Polynomial) {
        assert_eq!(self.num_vars, g.num_vars);
        if c == 0.0 || g.is_zero() {
            return;
        }

        let order = self.order;
        let shifted = g.terms.iter().map(|(m, x)| (m.mul(shift), -c * x));
        let lhs = std::mem::take(&mut self.terms);
        self.terms = merge(lhs.into_iter(), shifted, order);
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars);
        let other = other.with_order(self.order);

        Self {
            terms: merge(
                self.terms.iter().copied(),
                other.terms.iter().copied(),
                self.order,
            ),
            num_vars: self.num_vars,
            order: self.order,
        }
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        self.scale(-1.0)
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook algorithm).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars);

        if self.is_zero() || other.is_zero() {
            return Self::zero(self.num_vars, self.order);
        }

        let mut terms = Vec::with_capacity(self.len() * other.len());
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                terms.push((m1.mul(m2), c1 * c2));
            }
        }

        Self::new(terms, self.num_vars, self.order)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: f64) -> Self {
        if c == 0.0 {
            return Self::zero(self.num_vars, self.order);
        }

        Self {
            terms: self.terms.iter().map(|(m, x)| (*m, x * c)).collect(),
            num_vars: self.num_vars,
            order: self.order,
        }
    }

    /// Multiplies by the term c * m.
    #[must_use]
    pub fn mul_monomial(&self, m: &Monomial, c: f64) -> Self {
        if c == 0.0 {
            return Self::zero(self.num_vars, self.order);
        }

        Self {
            terms: self.terms.iter().map(|(m2, x)| (m.mul(m2), x * c)).collect(),
            num_vars: self.num_vars,
            order: self.order,
        }
    }

    /// Computes the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|(m, _)| m.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Compares coefficient-wise with an absolute tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.sub(other).max_norm() <= tol
    }

    /// Formats the polynomial with the given variable names.
    #[must_use]
    pub fn display_with(&self, names: &[String]) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let terms: Vec<_> = self
            .terms
            .iter()
            .map(|(m, c)| {
                let mon = m.display_with(names);
                if mon == "1" {
                    format!("{c}")
                } else {
                    format!("{c}*{mon}")
                }
            })
            .collect();

        terms.join(" + ")
    }
}

/// Merges two descending term streams, summing like terms.
fn merge(
    lhs: impl Iterator<Item = (Monomial, f64)>,
    rhs: impl Iterator<Item = (Monomial, f64)>,
    order: MonomialOrder,
) -> Vec<(Monomial, f64)> {
    let mut lhs = lhs.peekable();
    let mut rhs = rhs.peekable();
    let mut out = Vec::new();

    loop {
        let next = match (lhs.peek(), rhs.peek()) {
            (None, None) => break,
            (Some(_), None) => lhs.next(),
            (None, Some(_)) => rhs.next(),
            (Some((a, _)), Some((b, _))) => match order.compare(a, b) {
                Ordering::Greater => lhs.next(),
                Ordering::Less => rhs.next(),
                Ordering::Equal => {
                    let (m, x) = lhs.next().unwrap_or_default();
                    let (_, y) = rhs.next().unwrap_or_default();
                    let sum = x + y;
                    let scale = x.abs().max(y.abs());
                    if sum.abs() <= CANCELLATION_ULPS * f64::EPSILON * scale {
                        continue;
                    }
                    Some((m, sum))
                }
            },
        };

        if let Some((m, c)) = next {
            if c != 0.0 {
                out.push((m, c));
            }
        }
    }

    out
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_with(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(terms: &[(f64, &[u16])]) -> Polynomial {
        let n = terms.first().map_or(0, |(_, e)| e.len());
        Polynomial::new(
            terms.iter().map(|(c, e)| (Monomial::new(e), *c)).collect(),
            n,
            MonomialOrder::Grevlex,
        )
    }

    #[test]
    fn test_normalize_combines_terms() {
        // x + y - x + 2 = y + 2
        let p = poly(&[(1.0, &[1, 0]), (1.0, &[0, 1]), (-1.0, &[1, 0]), (2.0, &[0, 0])]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.leading_monomial(), Some(&Monomial::new(&[0, 1])));
        assert_eq!(p.coeff(&Monomial::one(2)), 2.0);
        assert_eq!(p.coeff(&Monomial::new(&[1, 0])), 0.0);
    }

    #[test]
    fn test_leading_term() {
        // y^2 + x has leading term y^2 in grevlex
        let p = poly(&[(1.0, &[1, 0]), (3.0, &[0, 2])]);
        assert_eq!(p.leading_monomial(), Some(&Monomial::new(&[0, 2])));
        assert_eq!(p.leading_coeff(), Some(3.0));
        assert_eq!(p.total_degree(), 2);
    }

    #[test]
    fn test_mul() {
        let order = MonomialOrder::Grevlex;
        let x = Polynomial::var(0, 2, order);
        let one = Polynomial::one(2, order);

        // (x + 1)^2 = x^2 + 2x + 1
        let xp1 = x.add(&one);
        let sq = xp1.mul(&xp1);
        assert_eq!(sq.len(), 3);
        assert_eq!(sq.coeff(&Monomial::new(&[1, 0])), 2.0);
    }

    #[test]
    fn test_sub_scaled_shifted_cancels_leading_term() {
        // f = 3x^3 + x, g = x^2 - 1: f - 3*x*g = 4x
        let mut f = poly(&[(3.0, &[3]), (1.0, &[1])]);
        let g = poly(&[(1.0, &[2]), (-1.0, &[0])]);

        f.sub_scaled_shifted(3.0, &Monomial::new(&[1]), &g);
        assert_eq!(f.len(), 1);
        assert_eq!(f.leading_term(), Some(&(Monomial::new(&[1]), 4.0)));
    }

    #[test]
    fn test_sub_scaled_shifted_drops_rounding_residue() {
        let lc = 0.1 + 0.2;
        let mut f = poly(&[(lc, &[2]), (1.0, &[0])]);
        let g = poly(&[(0.3, &[2])]);

        f.sub_scaled_shifted(lc / 0.3, &Monomial::one(1), &g);
        assert_eq!(f.leading_monomial(), Some(&Monomial::one(1)));
    }

    #[test]
    fn test_with_order() {
        // x + y^2: grevlex leads with y^2, lex leads with x
        let p = poly(&[(1.0, &[1, 0]), (1.0, &[0, 2])]);
        assert_eq!(p.leading_monomial(), Some(&Monomial::new(&[0, 2])));

        let lex = p.with_order(MonomialOrder::Lex);
        assert_eq!(lex.leading_monomial(), Some(&Monomial::new(&[1, 0])));
    }

    #[test]
    fn test_prune_and_approx_eq() {
        let mut p = poly(&[(1.0, &[1]), (1e-14, &[0])]);
        let q = poly(&[(1.0, &[1])]);

        assert!(p.approx_eq(&q, 1e-12));
        assert!(!p.approx_eq(&q, 1e-16));
        p.prune(1e-12);
        assert_eq!(p, q);
    }

    #[test]
    fn test_display() {
        let p = poly(&[(2.0, &[1, 0]), (-1.0, &[0, 0])]);
        let names = vec!["x".to_string(), "y".to_string()];
        assert_eq!(p.display_with(&names), "2*x + -1");
        assert_eq!(Polynomial::zero(2, MonomialOrder::Grevlex).to_string(), "0");
    }
}
