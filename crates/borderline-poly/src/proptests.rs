//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::monomial::Monomial;
    use crate::ordering::MonomialOrder;
    use crate::polynomial::Polynomial;

    // Small integer coefficients keep every sum and product exact.
    fn small_coeff() -> impl Strategy<Value = f64> {
        (-20i32..20i32).prop_map(f64::from)
    }

    fn small_monomial() -> impl Strategy<Value = Monomial> {
        proptest::collection::vec(0u16..4, 2).prop_map(|e| Monomial::new(&e))
    }

    fn small_poly() -> impl Strategy<Value = Polynomial> {
        proptest::collection::vec((small_monomial(), small_coeff()), 0..6)
            .prop_map(|terms| Polynomial::new(terms, 2, MonomialOrder::Grevlex))
    }

    fn any_order() -> impl Strategy<Value = MonomialOrder> {
        prop_oneof![
            Just(MonomialOrder::Lex),
            Just(MonomialOrder::Grlex),
            Just(MonomialOrder::Grevlex),
        ]
    }

    proptest! {
        #[test]
        fn poly_add_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_additive_inverse(a in small_poly()) {
            prop_assert!(a.sub(&a).is_zero());
        }

        #[test]
        fn sub_scaled_shifted_matches_arithmetic(
            a in small_poly(),
            g in small_poly(),
            m in small_monomial(),
            c in small_coeff(),
        ) {
            let mut fused = a.clone();
            fused.sub_scaled_shifted(c, &m, &g);
            let expected = a.sub(&g.mul_monomial(&m, c));
            prop_assert_eq!(fused, expected);
        }

        #[test]
        fn terms_sorted_descending(a in small_poly(), order in any_order()) {
            let p = a.with_order(order);
            for w in p.terms().windows(2) {
                prop_assert_eq!(order.compare(&w[0].0, &w[1].0), std::cmp::Ordering::Greater);
            }
        }

        #[test]
        fn order_is_multiplicative(
            a in small_monomial(),
            b in small_monomial(),
            m in small_monomial(),
            order in any_order(),
        ) {
            prop_assert_eq!(order.compare(&a, &b), order.compare(&a.mul(&m), &b.mul(&m)));
        }

        #[test]
        fn difference_detects_division(a in small_monomial(), b in small_monomial()) {
            let divides = a.difference(&b).iter().all(|&d| d >= 0);
            prop_assert_eq!(divides, a.is_divisible_by(&b));
        }
    }
}
