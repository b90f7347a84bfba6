//! Border bases.
//!
//! A border basis of an ideal I with respect to an order ideal O is a set of
//! polynomials g_t = t - sum_{o in O} c_{t,o} o, one for each monomial t on
//! the border of O. Any polynomial is reduced to its normal form in span(O)
//! by repeatedly cancelling its largest term outside O with a multiple of a
//! border generator.

use borderline_linalg::Tolerance;
use borderline_poly::{Monomial, PolyRing, Polynomial};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::basis::Basis;
use crate::error::{BorderBasisError, Result};
use crate::universe::{is_order_ideal, ComputationalUniverse};

/// A border basis living in a computational universe.
#[derive(Clone, Debug)]
pub struct BorderBasis<U> {
    universe: U,
    /// Sorted ascending; `order_ideal[0]` is 1.
    order_ideal: Vec<Monomial>,
    /// Sorted ascending.
    border: Vec<Monomial>,
    /// `generators[i]` has leading monomial `border[i]`.
    generators: Vec<Polynomial>,
    border_index: FxHashMap<Monomial, usize>,
}

impl<U: ComputationalUniverse> BorderBasis<U> {
    /// Assembles a border basis from an order ideal and one generator per
    /// border monomial, in any order.
    ///
    /// # Errors
    ///
    /// Fails with [`BorderBasisError::PreconditionViolation`] if `order_ideal`
    /// is empty or not division-closed, if a generator lives in a different
    /// number of variables, if its leading monomial is not on the border or
    /// is shared with another generator, if a leading coefficient is not 1,
    /// if a non-leading term lies outside the order ideal, or if some border
    /// monomial has no generator.
    pub fn new(universe: U, order_ideal: Vec<Monomial>, generators: Vec<Polynomial>) -> Result<Self> {
        let ring = universe.ring();
        let tol = universe.tolerance().pivot_floor();

        if order_ideal.is_empty() {
            return Err(BorderBasisError::precondition("the order ideal is empty"));
        }
        if !is_order_ideal(&order_ideal) {
            return Err(BorderBasisError::precondition("the order ideal is not division-closed"));
        }

        let mut order_ideal = order_ideal;
        ring.order().sort_ascending(&mut order_ideal);
        let border = universe.border(&order_ideal);
        let border_index: FxHashMap<Monomial, usize> =
            border.iter().enumerate().map(|(i, m)| (*m, i)).collect();
        let inside: FxHashSet<Monomial> = order_ideal.iter().copied().collect();

        let mut slots: Vec<Option<Polynomial>> = vec![None; border.len()];
        for g in generators {
            if g.num_vars() != ring.num_vars() {
                return Err(BorderBasisError::precondition(format!(
                    "generator in {} variables, ring has {}",
                    g.num_vars(),
                    ring.num_vars()
                )));
            }
            let g = g.with_order(ring.order());
            let Some(&(lm, lc)) = g.leading_term() else {
                return Err(BorderBasisError::precondition("zero polynomial among the generators"));
            };
            let name = lm.display_with(ring.names());
            let slot = border_index
                .get(&lm)
                .ok_or_else(|| BorderBasisError::precondition(format!("leading monomial {name} is not on the border")))?;
            if (lc - 1.0).abs() > tol {
                return Err(BorderBasisError::precondition(format!(
                    "generator with leading monomial {name} has leading coefficient {lc}"
                )));
            }
            if !g.is_supported_on(|m| *m == lm || inside.contains(m)) {
                return Err(BorderBasisError::precondition(format!(
                    "generator {} has terms outside the order ideal",
                    ring.display(&g)
                )));
            }
            if slots[*slot].replace(g).is_some() {
                return Err(BorderBasisError::precondition(format!(
                    "two generators share the leading monomial {name}"
                )));
            }
        }

        let generators = slots
            .into_iter()
            .zip(&border)
            .map(|(g, t)| {
                g.ok_or_else(|| {
                    BorderBasisError::precondition(format!(
                        "no generator for border monomial {}",
                        t.display_with(ring.names())
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            universe,
            order_ideal,
            border,
            generators,
            border_index,
        })
    }

    /// The order ideal O, ascending.
    #[must_use]
    pub fn order_ideal(&self) -> &[Monomial] {
        &self.order_ideal
    }

    /// The border of O, ascending. Aligned with [`Basis::generators`].
    #[must_use]
    pub fn border(&self) -> &[Monomial] {
        &self.border
    }

    /// The universe the basis was computed in.
    #[must_use]
    pub fn universe(&self) -> &U {
        &self.universe
    }

    /// The generator whose leading monomial is nearest to `t` among those
    /// dividing it.
    ///
    /// Distance is the total degree of `t / LM(g)`. Ties go to the first
    /// border monomial in ascending order.
    ///
    /// # Errors
    ///
    /// Fails with [`BorderBasisError::PreconditionViolation`] if no border
    /// monomial divides `t`.
    pub fn find_basis_nearest_lt(&self, t: &Monomial) -> Result<&Polynomial> {
        let mut best: Option<(i32, usize)> = None;
        for (i, b) in self.border.iter().enumerate() {
            let diff = t.difference(b);
            if diff.iter().any(|&e| e < 0) {
                continue;
            }
            let distance: i32 = diff.iter().sum();
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, i));
            }
        }
        best.map(|(_, i)| &self.generators[i]).ok_or_else(|| {
            BorderBasisError::precondition(format!(
                "no border monomial divides {}",
                t.display_with(self.ring().names())
            ))
        })
    }

    /// The generator with leading monomial exactly `t`.
    ///
    /// # Errors
    ///
    /// Fails with [`BorderBasisError::PreconditionViolation`] if `t` is not
    /// on the border.
    pub fn find_basis_with_lt(&self, t: &Monomial) -> Result<&Polynomial> {
        self.border_index
            .get(t)
            .map(|&i| &self.generators[i])
            .ok_or_else(|| {
                BorderBasisError::precondition(format!(
                    "{} is not on the border",
                    t.display_with(self.ring().names())
                ))
            })
    }

    fn in_order_ideal(&self, m: &Monomial) -> bool {
        let order = self.ring().order();
        self.order_ideal
            .binary_search_by(|other| order.compare(other, m))
            .is_ok()
    }
}

impl<U: ComputationalUniverse> Basis for BorderBasis<U> {
    fn ring(&self) -> &PolyRing {
        self.universe.ring()
    }

    fn generators(&self) -> &[Polynomial] {
        &self.generators
    }

    fn quotient_basis(&self) -> &[Monomial] {
        &self.order_ideal
    }

    fn tolerance(&self) -> &Tolerance {
        self.universe.tolerance()
    }

    /// # Errors
    ///
    /// Fails with [`BorderBasisError::PreconditionViolation`] if `f` has the
    /// wrong number of variables.
    fn quotient(&self, f: &Polynomial) -> Result<Polynomial> {
        let ring = self.ring();
        if f.num_vars() != ring.num_vars() {
            return Err(BorderBasisError::precondition(format!(
                "polynomial in {} variables, ring has {}",
                f.num_vars(),
                ring.num_vars()
            )));
        }

        let delta = self.tolerance().delta;
        let mut f = f.with_order(ring.order());
        f.prune(delta);

        // Terms are sorted descending, so the first term outside O is the
        // largest one; reducing it only introduces smaller terms.
        while let Some(&(t, c)) = f.terms().iter().find(|(m, _)| !self.in_order_ideal(m)) {
            let g = self.find_basis_nearest_lt(&t)?;
            let Some(&(lm, lc)) = g.leading_term() else {
                return Err(BorderBasisError::precondition("zero polynomial among the generators"));
            };
            let shift = t.div(&lm).ok_or_else(|| BorderBasisError::precondition("border generator does not divide"))?;
            f.sub_scaled_shifted(c / lc, &shift, g);
            f.prune(delta);
        }
        Ok(f)
    }
}
