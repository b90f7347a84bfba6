//! Universes bounded by total degree.

use borderline_linalg::Tolerance;
use borderline_poly::{Monomial, PolyRing, Polynomial};

use super::ComputationalUniverse;

/// All monomials of total degree at most `degree`.
#[derive(Clone, Debug)]
pub struct DegreeBoundedUniverse {
    ring: PolyRing,
    tolerance: Tolerance,
    degree: u32,
    /// Sorted descending.
    monomials: Vec<Monomial>,
}

impl DegreeBoundedUniverse {
    /// Creates the universe of monomials of degree at most `degree`.
    #[must_use]
    pub fn new(ring: PolyRing, degree: u32, tolerance: Tolerance) -> Self {
        let mut monomials = monomials_up_to(ring.num_vars(), degree);
        ring.order().sort_descending(&mut monomials);
        Self {
            ring,
            tolerance,
            degree,
            monomials,
        }
    }

    /// The smallest universe containing every generator, and at least the
    /// linear monomials.
    #[must_use]
    pub fn from_support(ring: &PolyRing, generators: &[Polynomial], tolerance: Tolerance) -> Self {
        let degree = generators
            .iter()
            .map(Polynomial::total_degree)
            .max()
            .unwrap_or(0)
            .max(1);
        Self::new(ring.clone(), degree, tolerance)
    }

    /// The degree bound.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.degree
    }
}

impl ComputationalUniverse for DegreeBoundedUniverse {
    fn ring(&self) -> &PolyRing {
        &self.ring
    }

    fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }

    fn contains(&self, m: &Monomial) -> bool {
        m.total_degree() <= self.degree
    }

    fn extend(&self) -> Self {
        Self::new(self.ring.clone(), self.degree + 1, self.tolerance)
    }
}

/// Every exponent vector in `num_vars` variables with entry sum at most
/// `degree`.
fn monomials_up_to(num_vars: usize, degree: u32) -> Vec<Monomial> {
    let mut out = Vec::new();
    let mut exps = vec![0u16; num_vars];
    fill(&mut exps, 0, degree, &mut out);
    out
}

fn fill(exps: &mut [u16], var: usize, budget: u32, out: &mut Vec<Monomial>) {
    if var == exps.len() {
        out.push(Monomial::new(exps));
        return;
    }
    for e in 0..=budget {
        exps[var] = e as u16;
        fill(exps, var + 1, budget - e, out);
    }
    exps[var] = 0;
}
