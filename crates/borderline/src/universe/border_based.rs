//! Universes grown one border layer at a time.
//!
//! Starting from the divisor closure of the generator supports, each
//! extension adds the border of the current set. The universe stays an order
//! ideal and grows more slowly than a full degree bound when the generators
//! are sparse.

use borderline_linalg::Tolerance;
use borderline_poly::{Monomial, PolyRing, Polynomial};
use rustc_hash::FxHashSet;

use super::{sorted_descending, ComputationalUniverse};

/// An order ideal of monomials that grows by its border.
#[derive(Clone, Debug)]
pub struct BorderBasedUniverse {
    ring: PolyRing,
    tolerance: Tolerance,
    members: FxHashSet<Monomial>,
    /// Sorted descending.
    monomials: Vec<Monomial>,
}

impl BorderBasedUniverse {
    /// Creates the universe spanned by the divisors of `seeds`.
    #[must_use]
    pub fn new(ring: PolyRing, seeds: impl IntoIterator<Item = Monomial>, tolerance: Tolerance) -> Self {
        let one = Monomial::one(ring.num_vars());
        let divisors: Vec<Monomial> = seeds
            .into_iter()
            .flat_map(|m| m.divisors().collect::<Vec<_>>())
            .chain(std::iter::once(one))
            .collect();
        let monomials = sorted_descending(divisors, ring.order());
        let members = monomials.iter().copied().collect();
        Self {
            ring,
            tolerance,
            members,
            monomials,
        }
    }

    /// The divisor closure of the generator supports.
    #[must_use]
    pub fn from_support(ring: &PolyRing, generators: &[Polynomial], tolerance: Tolerance) -> Self {
        let seeds: Vec<Monomial> = generators.iter().flat_map(|g| g.monomials().copied()).collect();
        Self::new(ring.clone(), seeds, tolerance)
    }
}

impl ComputationalUniverse for BorderBasedUniverse {
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
        self.members.contains(m)
    }

    fn extend(&self) -> Self {
        let monomials = self.closure(&self.monomials);
        let members = monomials.iter().copied().collect();
        Self {
            ring: self.ring.clone(),
            tolerance: self.tolerance,
            members,
            monomials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::is_order_ideal;
    use borderline_poly::MonomialOrder;

    #[test]
    fn test_divisor_closure() {
        let ring = PolyRing::new(["x", "y"], MonomialOrder::Grevlex);
        let gens = [ring.poly(&[(1.0, &[2, 1]), (-1.0, &[0, 0])])];

        let universe = BorderBasedUniverse::from_support(&ring, &gens, Tolerance::default());

        // Divisors of x^2 y: 1, x, y, x^2, xy, x^2 y.
        assert_eq!(universe.len(), 6);
        assert!(universe.contains(&ring.monomial(&[1, 1])));
        assert!(!universe.contains(&ring.monomial(&[0, 2])));
        assert!(is_order_ideal(universe.monomials()));
    }

    #[test]
    fn test_extend_adds_border() {
        let ring = PolyRing::new(["x", "y"], MonomialOrder::Grevlex);
        let universe = BorderBasedUniverse::new(ring.clone(), [ring.monomial(&[1, 0])], Tolerance::default());
        assert_eq!(universe.len(), 2);

        // {1, x} gains its border {y, x^2, xy}.
        let bigger = universe.extend();
        assert_eq!(bigger.len(), 5);
        assert!(bigger.contains(&ring.monomial(&[2, 0])));
        assert!(bigger.contains(&ring.monomial(&[1, 1])));
        assert!(is_order_ideal(bigger.monomials()));

        // Columns stay sorted descending.
        let order = ring.order();
        assert!(bigger
            .monomials()
            .windows(2)
            .all(|w| order.compare(&w[0], &w[1]).is_gt()));
    }
}
