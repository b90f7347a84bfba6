//! Factory configuration.

use borderline_linalg::Tolerance;
use borderline_poly::MonomialOrder;

/// Configuration for [`BorderBasisFactory`](crate::BorderBasisFactory).
#[derive(Clone, Debug, PartialEq)]
pub struct FactoryConfig {
    /// Coefficients and pivots at or below this magnitude are zero.
    pub delta: f64,
    /// Pivots must exceed `delta * rank_gap`.
    pub rank_gap: f64,
    /// Monomial order used for leading terms.
    pub order: MonomialOrder,
    /// Universe extensions allowed before giving up.
    pub max_extensions: usize,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            delta: 1e-10,
            rank_gap: 1e2,
            order: MonomialOrder::Grevlex,
            max_extensions: 32,
        }
    }
}

impl FactoryConfig {
    /// Sets the zero threshold.
    #[must_use]
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the rank gap.
    #[must_use]
    pub fn with_rank_gap(mut self, rank_gap: f64) -> Self {
        self.rank_gap = rank_gap;
        self
    }

    /// Sets the monomial order.
    #[must_use]
    pub fn with_order(mut self, order: MonomialOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the extension budget.
    #[must_use]
    pub fn with_max_extensions(mut self, max_extensions: usize) -> Self {
        self.max_extensions = max_extensions;
        self
    }

    /// The row-reduction tolerance this configuration implies.
    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.delta).with_rank_gap(self.rank_gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FactoryConfig::default();
        assert_eq!(config.tolerance(), Tolerance::default());
        assert_eq!(config.order, MonomialOrder::Grevlex);
        assert_eq!(config.max_extensions, 32);
    }

    #[test]
    fn test_builders() {
        let config = FactoryConfig::default()
            .with_delta(1e-8)
            .with_rank_gap(10.0)
            .with_order(MonomialOrder::Lex)
            .with_max_extensions(4);

        assert!((config.tolerance().pivot_floor() - 1e-7).abs() < 1e-20);
        assert_eq!(config.order, MonomialOrder::Lex);
        assert_eq!(config.max_extensions, 4);
    }
}
