//! Property-based tests for the ring laws of Z[√2].

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_traits::{One, Zero};
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use crate::QuadraticInt2;

    type Q = QuadraticInt2<BigInt>;

    // Strategy for elements with small coefficients
    fn small_elem() -> impl Strategy<Value = Q> {
        (-1000i64..1000i64, -1000i64..1000i64)
            .prop_map(|(a, b)| QuadraticInt2::new(BigInt::from(a), BigInt::from(b)))
    }

    // Strategy for elements whose products overflow machine words
    fn big_elem() -> impl Strategy<Value = Q> {
        (any::<i64>(), any::<i64>(), any::<i64>()).prop_map(|(a, b, s)| {
            let scale = BigInt::from(s) * BigInt::from(u64::MAX);
            QuadraticInt2::new(BigInt::from(a) * &scale, BigInt::from(b) + scale)
        })
    }

    fn hash_of(q: &Q) -> u64 {
        let mut state = DefaultHasher::new();
        q.hash(&mut state);
        state.finish()
    }

    proptest! {
        #[test]
        fn add_commutative(a in small_elem(), b in small_elem()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn add_associative(a in small_elem(), b in small_elem(), c in small_elem()) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }

        #[test]
        fn mul_commutative(a in big_elem(), b in big_elem()) {
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn mul_associative(a in small_elem(), b in small_elem(), c in small_elem()) {
            prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        }

        #[test]
        fn distributive(a in small_elem(), b in small_elem(), c in small_elem()) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn identities(a in big_elem()) {
            prop_assert_eq!(&a + &Q::zero(), a.clone());
            prop_assert_eq!(&Q::one() * &a, a.clone());
            prop_assert!((&a * &Q::zero()).is_zero());
        }

        #[test]
        fn additive_inverse(a in big_elem()) {
            prop_assert!((&a + &(-&a)).is_zero());
            prop_assert_eq!(&a - &a, Q::zero());
        }

        #[test]
        fn norm_multiplicative(a in small_elem(), b in small_elem()) {
            prop_assert_eq!((&a * &b).norm(), a.norm() * b.norm());
        }

        #[test]
        fn operands_unchanged(a in small_elem(), b in small_elem()) {
            let (a0, b0) = (a.clone(), b.clone());
            let _ = &a * &b;
            let _ = &a + &b;
            prop_assert_eq!(a, a0);
            prop_assert_eq!(b, b0);
        }

        #[test]
        fn hash_consistent(a in -1000i64..1000, b in -1000i64..1000) {
            let x: Q = QuadraticInt2::new(a.into(), b.into());
            let y: Q = QuadraticInt2::new(a.into(), b.into());
            prop_assert_eq!(hash_of(&x), hash_of(&y));
        }

        #[test]
        fn index_bijective(a in big_elem()) {
            prop_assert_eq!(Q::from_index(&a.to_index()), a);
        }

        #[test]
        fn ordering_matches_float(a in small_elem(), b in small_elem()) {
            use num_traits::ToPrimitive;
            let (fa, fb) = (a.to_f64().unwrap(), b.to_f64().unwrap());
            if a != b {
                prop_assert_eq!(a < b, fa < fb);
            }
        }
    }
}
