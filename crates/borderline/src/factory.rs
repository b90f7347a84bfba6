//! Border basis construction.
//!
//! The factory searches for a fixed point over a growing computational
//! universe L. In each round the span V of the generators is replaced by its
//! L-stable extension, and the monomials of L that are not leading monomials
//! of V form a candidate order ideal B. Once B and all its multiples by a
//! variable lie in L, the rows of V led by border monomials of B form a
//! border basis.
//!
//! # References
//!
//! - Kehrein, Kreuzer, "Characterizations of border bases" (2005)
//! - Mourrain, Trébuchet, "Stable normal forms for polynomial system solving" (2008)

use borderline_linalg::{lt_normalize, CsrMatrix};
use borderline_poly::{Monomial, PolyRing, Polynomial};
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::border_basis::BorderBasis;
use crate::config::FactoryConfig;
use crate::error::{BorderBasisError, Result};
use crate::universe::{is_order_ideal, ComputationalUniverse, DegreeBoundedUniverse};

/// Snapshot of one iteration of the stabilization loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StabilizationStep {
    /// Zero-based iteration number; equals the extensions spent so far.
    pub iteration: usize,
    /// Monomials in the universe.
    pub universe_size: usize,
    /// Dimension of the stable span.
    pub dimension: usize,
    /// Size of the supplementary monomial set.
    pub supplementary_size: usize,
    /// Whether this iteration reached the fixed point.
    pub stable: bool,
}

/// Builds border bases from generating sets.
#[derive(Clone, Debug, Default)]
pub struct BorderBasisFactory {
    config: FactoryConfig,
}

impl BorderBasisFactory {
    /// Creates a factory with the given configuration.
    #[must_use]
    pub fn new(config: FactoryConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Computes a border basis of the ideal generated by `generators`.
    ///
    /// The ring and generators are re-targeted to the configured monomial
    /// order. Computation happens in degree-bounded universes.
    ///
    /// # Errors
    ///
    /// - [`BorderBasisError::PreconditionViolation`] for invalid input or a
    ///   unit ideal (empty order ideal).
    /// - [`BorderBasisError::Convergence`] if no fixed point is reached
    ///   within `max_extensions` extensions.
    /// - [`BorderBasisError::NumericInstability`] if a rank decision is
    ///   ambiguous at the configured tolerance.
    /// - [`BorderBasisError::Linalg`] for any other row reduction failure.
    pub fn generate(&self, ring: &PolyRing, generators: &[Polynomial]) -> Result<BorderBasis<DegreeBoundedUniverse>> {
        self.generate_traced(ring, generators, |_| {})
    }

    /// Like [`generate`](Self::generate), reporting every loop iteration to
    /// `observer`.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate).
    pub fn generate_traced(
        &self,
        ring: &PolyRing,
        generators: &[Polynomial],
        observer: impl FnMut(&StabilizationStep),
    ) -> Result<BorderBasis<DegreeBoundedUniverse>> {
        let ring = ring.with_order(self.config.order);
        let generators = prepare(&ring, generators)?;
        let universe = DegreeBoundedUniverse::from_support(&ring, &generators, self.config.tolerance());
        self.stabilize(universe, &generators, observer)
    }

    /// Computes a border basis inside a caller-supplied universe, which is
    /// extended as needed. The universe's ring and tolerance are used.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate). Generators with terms outside the
    /// initial universe are a precondition violation.
    pub fn generate_in<U: ComputationalUniverse>(&self, universe: U, generators: &[Polynomial]) -> Result<BorderBasis<U>> {
        let generators = prepare(universe.ring(), generators)?;
        self.stabilize(universe, &generators, |_| {})
    }

    fn stabilize<U: ComputationalUniverse>(
        &self,
        universe: U,
        generators: &[Polynomial],
        mut observer: impl FnMut(&StabilizationStep),
    ) -> Result<BorderBasis<U>> {
        let order = universe.ring().order();
        if !order.is_degree_compatible() {
            warn!(%order, "monomial order is not degree compatible; the order ideal may be unexpected");
        }

        let mut universe = universe;
        let initial = universe.vector_space(generators)?;
        let mut span = universe.as_polys(&universe.row_reduce(&initial)?.matrix);

        for iteration in 0..=self.config.max_extensions {
            let stable = universe.stable_extension(&universe.vector_space(&span)?)?;
            let supplementary = universe.supplementary_space(&stable);
            let is_fixed_point = universe.contains_extension(&supplementary) && is_order_ideal(&supplementary);

            let step = StabilizationStep {
                iteration,
                universe_size: universe.len(),
                dimension: stable.num_rows(),
                supplementary_size: supplementary.len(),
                stable: is_fixed_point,
            };
            debug!(
                iteration,
                universe_size = step.universe_size,
                dimension = step.dimension,
                supplementary = step.supplementary_size,
                stable = is_fixed_point,
                "stabilization step"
            );
            observer(&step);

            if is_fixed_point {
                let basis = final_reduction(universe, &stable, supplementary)?;
                info!(
                    order_ideal = basis.order_ideal().len(),
                    border = basis.border().len(),
                    extensions = iteration,
                    "border basis computed"
                );
                return Ok(basis);
            }

            if iteration == self.config.max_extensions {
                break;
            }
            span = universe.as_polys(&stable);
            universe = universe.extend();
        }

        warn!(
            extensions = self.config.max_extensions,
            universe_size = universe.len(),
            "no stable order ideal; the ideal is probably not zero-dimensional"
        );
        Err(BorderBasisError::Convergence {
            extensions: self.config.max_extensions,
            universe_size: universe.len(),
        })
    }
}

/// Validates generators and brings them into the ring's order.
fn prepare(ring: &PolyRing, generators: &[Polynomial]) -> Result<Vec<Polynomial>> {
    if generators.is_empty() {
        return Err(BorderBasisError::precondition("no generators"));
    }
    if ring.num_vars() == 0 {
        return Err(BorderBasisError::precondition("the ring has no variables"));
    }
    if let Some(g) = generators.iter().find(|g| g.num_vars() != ring.num_vars()) {
        return Err(BorderBasisError::precondition(format!(
            "generator in {} variables, ring has {}",
            g.num_vars(),
            ring.num_vars()
        )));
    }

    let prepared: Vec<Polynomial> = generators
        .iter()
        .filter(|g| !g.is_zero())
        .map(|g| g.with_order(ring.order()))
        .collect();
    if prepared.is_empty() {
        return Err(BorderBasisError::precondition("every generator is zero"));
    }
    Ok(prepared)
}

/// Extracts the border generators from the stable span.
fn final_reduction<U: ComputationalUniverse>(
    universe: U,
    stable: &CsrMatrix,
    order_ideal: Vec<Monomial>,
) -> Result<BorderBasis<U>> {
    if order_ideal.is_empty() {
        return Err(BorderBasisError::precondition(
            "the order ideal is empty; the generators span the unit ideal",
        ));
    }

    let border: FxHashSet<_> = universe.border(&order_ideal).into_iter().collect();
    let reduced = universe.row_reduce(stable)?;
    let monomials = universe.monomials();
    let on_border = reduced
        .matrix
        .filter_rows(|row| border.contains(&monomials[reduced.pivots[row]]));
    let generators = universe.as_polys(&lt_normalize(&on_border)?);

    BorderBasis::new(universe, order_ideal, generators)
}
