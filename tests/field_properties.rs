use proptest::prelude::*;

use pointless::{Field, FiniteField, GaloisField, PrimeField, Ring};

/// Field sizes covered by the axiom checks: primes, odd and even prime powers.
const ORDERS: &[u64] = &[2, 3, 17, 4, 8, 9, 25, 27, 49, 64, 121];

fn arb_field() -> impl Strategy<Value = GaloisField> {
    prop::sample::select(ORDERS).prop_map(|q| GaloisField::new(q).unwrap())
}

/// A field together with `k` of its elements.
fn arb_elements(k: usize) -> impl Strategy<Value = (GaloisField, Vec<u32>)> {
    arb_field().prop_flat_map(move |f| {
        let q = f.order();
        let elems = prop::collection::vec(0..q, k);
        (Just(f), elems).prop_map(|(f, idx)| {
            let elems = idx.into_iter().map(|i| f.from_index(i).unwrap()).collect();
            (f, elems)
        })
    })
}

fn arb_triple() -> impl Strategy<Value = (GaloisField, u32, u32, u32)> {
    arb_elements(3).prop_map(|(f, e)| (f, e[0], e[1], e[2]))
}

// ===== Addition properties =====

proptest! {
    #[test]
    fn addition_commutative((f, a, b, _) in arb_triple()) {
        prop_assert_eq!(f.add(a, b), f.add(b, a));
    }
}

proptest! {
    #[test]
    fn addition_associative((f, a, b, c) in arb_triple()) {
        prop_assert_eq!(f.add(f.add(a, b), c), f.add(a, f.add(b, c)));
    }
}

proptest! {
    #[test]
    fn additive_identity_and_inverse((f, a, _, _) in arb_triple()) {
        prop_assert_eq!(f.add(a, f.zero()), a);
        prop_assert_eq!(f.add(a, f.neg(a)), f.zero());
        prop_assert_eq!(f.neg(f.neg(a)), a);
    }
}

proptest! {
    #[test]
    fn subtraction_definition((f, a, b, _) in arb_triple()) {
        prop_assert_eq!(f.sub(a, b), f.add(a, f.neg(b)));
        prop_assert_eq!(f.sub(a, a), f.zero());
    }
}

proptest! {
    #[test]
    fn characteristic_annihilates((f, a, _, _) in arb_triple()) {
        let p = f.characteristic();
        let mut sum = f.zero();
        for _ in 0..p {
            sum = f.add(sum, a);
        }
        prop_assert_eq!(sum, f.zero());
    }
}

// ===== Multiplication properties =====

proptest! {
    #[test]
    fn multiplication_commutative((f, a, b, _) in arb_triple()) {
        prop_assert_eq!(f.mul(a, b), f.mul(b, a));
    }
}

proptest! {
    #[test]
    fn multiplication_associative((f, a, b, c) in arb_triple()) {
        prop_assert_eq!(f.mul(f.mul(a, b), c), f.mul(a, f.mul(b, c)));
    }
}

proptest! {
    #[test]
    fn multiplicative_identity((f, a, _, _) in arb_triple()) {
        prop_assert_eq!(f.mul(a, f.one()), a);
        prop_assert_eq!(f.mul(a, f.zero()), f.zero());
    }
}

proptest! {
    #[test]
    fn multiplicative_inverse((f, a, _, _) in arb_triple()) {
        match f.inverse(a) {
            Some(inv) => prop_assert_eq!(f.mul(a, inv), f.one()),
            None => prop_assert!(f.is_zero(a)),
        }
    }
}

proptest! {
    #[test]
    fn division_undoes_multiplication((f, a, b, _) in arb_triple()) {
        prop_assume!(!f.is_zero(b));
        prop_assert_eq!(f.try_div(f.mul(a, b), b), Some(a));
    }
}

// ===== Distributivity =====

proptest! {
    #[test]
    fn left_distributive((f, a, b, c) in arb_triple()) {
        prop_assert_eq!(f.mul(a, f.add(b, c)), f.add(f.mul(a, b), f.mul(a, c)));
    }
}

// ===== Powers =====

proptest! {
    #[test]
    fn fermat_little_theorem((f, a, _, _) in arb_triple()) {
        // a^q = a for every element of GF(q)
        prop_assert_eq!(f.pow(a, f.order()), a);
    }
}

proptest! {
    #[test]
    fn pow_adds_exponents((f, a, _, _) in arb_triple(), m in 0u64..50, n in 0u64..50) {
        prop_assert_eq!(f.mul(f.pow(a, m), f.pow(a, n)), f.pow(a, m + n));
    }
}

proptest! {
    #[test]
    fn table_pow_matches_repeated_multiplication((f, a, _, _) in arb_triple(), e in 0u64..20) {
        let mut acc = f.one();
        for _ in 0..e {
            acc = f.mul(acc, a);
        }
        prop_assert_eq!(f.pow(a, e), acc);
    }
}

proptest! {
    #[test]
    fn frobenius_is_additive((f, a, b, _) in arb_triple()) {
        let p = f.characteristic();
        prop_assert_eq!(f.pow(f.add(a, b), p), f.add(f.pow(a, p), f.pow(b, p)));
    }
}

// ===== Encoding =====

proptest! {
    #[test]
    fn index_encoding_is_stable((f, a, _, _) in arb_triple()) {
        prop_assert!(f.to_u64(a) < f.order());
        prop_assert_eq!(f.from_index(f.to_u64(a)), Some(a));
    }
}

// ===== Prime field agrees with integer arithmetic =====

proptest! {
    #[test]
    fn prime_field_matches_modular_arithmetic(a in 0u64..1_000_003, b in 0u64..1_000_003) {
        let f = PrimeField::new(1_000_003).unwrap();
        prop_assert_eq!(f.add(a, b), (a + b) % 1_000_003);
        prop_assert_eq!(f.mul(a, b), (a * b) % 1_000_003);
        prop_assert_eq!(f.sub(a, b), (a + 1_000_003 - b) % 1_000_003);
    }
}

#[test]
fn elements_enumerate_field_once() {
    for &q in ORDERS {
        let f = GaloisField::new(q).unwrap();
        let mut elems = f.elements();
        assert_eq!(elems.len() as u64, q);
        assert_eq!(elems[0], f.zero());
        elems.sort();
        elems.dedup();
        assert_eq!(elems.len() as u64, q);
    }
}

#[test]
fn multiplicative_group_is_cyclic() {
    for &q in ORDERS {
        let f = GaloisField::new(q).unwrap();
        let g = f.generator();
        let mut seen = std::collections::HashSet::new();
        let mut x = f.one();
        for _ in 0..q - 1 {
            seen.insert(x);
            x = f.mul(x, g);
        }
        assert_eq!(x, f.one());
        assert_eq!(seen.len() as u64, q - 1);
    }
}
