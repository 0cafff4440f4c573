use core::fmt;

use crate::algebra::field::{Field, FiniteField};
use crate::algebra::ring::Ring;
use crate::structures::gf::FieldError;
use crate::utils::{is_prime, prime_divisors};

/// Prime field GF(p) for a prime `p` chosen at run time.
///
/// Elements are the canonical residues in `[0, p)`, stored as `u64`.
/// Products are formed in `u128`, so any `u64` prime is supported.
///
/// # Example
///
/// ```
/// use pointless::{Field, PrimeField, Ring};
///
/// let f17 = PrimeField::new(17).unwrap();
///
/// let a = f17.from_u64(3);
/// assert_eq!(f17.pow(a, 16), f17.one()); // Fermat: a^(p-1) = 1
/// assert_eq!(f17.mul(a, f17.inverse(a).unwrap()), f17.one());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrimeField {
    p: u64,
}

impl PrimeField {
    /// Create the prime field of order `p`.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::NotPrime` if `p` is not prime.
    pub fn new(p: u64) -> Result<Self, FieldError> {
        if !is_prime(p) {
            return Err(FieldError::NotPrime(p));
        }
        Ok(Self { p })
    }

    /// The modulus `p`.
    pub const fn modulus(&self) -> u64 {
        self.p
    }

    /// Check if `g` generates the multiplicative group F_p^*.
    pub fn is_primitive_root(&self, g: u64) -> bool {
        let g = g % self.p;
        if g == 0 {
            return false;
        }
        if self.p == 2 {
            return g == 1;
        }

        // g^{(p-1)/r} != 1 for every prime r dividing p-1
        let order = self.p - 1;
        prime_divisors(order)
            .into_iter()
            .all(|r| self.pow(g, order / r) != 1)
    }

    /// The smallest primitive root modulo `p`.
    pub fn primitive_root(&self) -> u64 {
        (1..self.p)
            .find(|&g| self.is_primitive_root(g))
            .unwrap_or(1)
    }
}

impl Ring for PrimeField {
    type Element = u64;

    #[inline]
    fn zero(&self) -> u64 {
        0
    }

    #[inline]
    fn one(&self) -> u64 {
        1 % self.p
    }

    #[inline]
    fn from_u64(&self, n: u64) -> u64 {
        n % self.p
    }

    #[inline]
    fn add(&self, a: u64, b: u64) -> u64 {
        let (sum, overflow) = a.overflowing_add(b);
        if overflow || sum >= self.p {
            sum.wrapping_sub(self.p)
        } else {
            sum
        }
    }

    #[inline]
    fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            self.p - (b - a)
        }
    }

    #[inline]
    fn neg(&self, a: u64) -> u64 {
        if a == 0 {
            0
        } else {
            self.p - a
        }
    }

    #[inline]
    fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.p as u128) as u64
    }
}

impl Field for PrimeField {
    /// Inverse via the extended Euclidean algorithm.
    fn inverse(&self, a: u64) -> Option<u64> {
        let a = a % self.p;
        if a == 0 {
            return None;
        }

        let (mut old_r, mut r) = (a as i128, self.p as i128);
        let (mut old_s, mut s) = (1i128, 0i128);
        while r != 0 {
            let quotient = old_r / r;
            (old_r, r) = (r, old_r - quotient * r);
            (old_s, s) = (s, old_s - quotient * s);
        }

        Some(old_s.rem_euclid(self.p as i128) as u64)
    }
}

impl FiniteField for PrimeField {
    fn order(&self) -> u64 {
        self.p
    }

    fn characteristic(&self) -> u64 {
        self.p
    }

    fn to_u64(&self, a: u64) -> u64 {
        a
    }

    fn from_index(&self, index: u64) -> Option<u64> {
        (index < self.p).then_some(index)
    }

    fn fmt_element(&self, a: u64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", a)
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f17() -> PrimeField {
        PrimeField::new(17).unwrap()
    }

    #[test]
    fn rejects_composite() {
        assert_eq!(PrimeField::new(15), Err(FieldError::NotPrime(15)));
        assert_eq!(PrimeField::new(1), Err(FieldError::NotPrime(1)));
        assert!(PrimeField::new(2).is_ok());
    }

    #[test]
    fn add_wraps() {
        let f = f17();
        assert_eq!(f.add(10, 10), 3);
        assert_eq!(f.add(16, 1), 0);
        assert_eq!(f.add(0, 0), 0);
    }

    #[test]
    fn sub_and_neg() {
        let f = f17();
        assert_eq!(f.sub(3, 5), 15);
        assert_eq!(f.sub(5, 3), 2);
        assert_eq!(f.neg(0), 0);
        assert_eq!(f.neg(1), 16);
        assert_eq!(f.add(7, f.neg(7)), 0);
    }

    #[test]
    fn mul_reduces() {
        let f = f17();
        assert_eq!(f.mul(5, 7), 1); // 35 = 2*17 + 1
        assert_eq!(f.mul(16, 16), 1);
        assert_eq!(f.mul(0, 9), 0);
    }

    #[test]
    fn mul_large_prime_no_overflow() {
        let p = 4_294_967_311; // smallest prime above 2^32, so (p-1)^2 overflows u64
        let f = PrimeField::new(p).unwrap();
        assert_eq!(f.mul(p - 1, p - 1), 1);
        assert_eq!(f.add(p - 1, p - 1), p - 2);
    }

    #[test]
    fn pow_basic() {
        let f = f17();
        assert_eq!(f.pow(3, 0), 1);
        assert_eq!(f.pow(3, 1), 3);
        assert_eq!(f.pow(3, 2), 9);
        assert_eq!(f.pow(3, 3), 10);
        assert_eq!(f.pow(0, 0), 1);
        assert_eq!(f.pow(0, 5), 0);
    }

    #[test]
    fn pow_fermat() {
        let f = f17();
        for a in 1..17 {
            assert_eq!(f.pow(a, 16), 1, "a^(p-1) != 1 for a = {}", a);
        }
    }

    #[test]
    fn inverse_all_nonzero() {
        let f = f17();
        for a in 1..17 {
            let inv = f.inverse(a).unwrap();
            assert_eq!(f.mul(a, inv), 1, "inverse({}) failed", a);
        }
        assert_eq!(f.inverse(0), None);
    }

    #[test]
    fn try_div() {
        let f = f17();
        assert_eq!(f.try_div(6, 3), Some(2));
        assert_eq!(f.try_div(6, 0), None);
    }

    #[test]
    fn primitive_roots() {
        assert_eq!(f17().primitive_root(), 3);
        assert_eq!(PrimeField::new(7).unwrap().primitive_root(), 3);
        assert_eq!(PrimeField::new(13).unwrap().primitive_root(), 2);
        assert_eq!(PrimeField::new(2).unwrap().primitive_root(), 1);
        assert!(!f17().is_primitive_root(2)); // 2 has order 8
    }

    #[test]
    fn elements_enumerated_in_order() {
        let f = PrimeField::new(5).unwrap();
        assert_eq!(f.elements(), vec![0, 1, 2, 3, 4]);
        assert_eq!(f.from_index(5), None);
    }

    #[test]
    fn from_u64_reduces() {
        let f = f17();
        assert_eq!(f.from_u64(17), 0);
        assert_eq!(f.from_u64(20), 3);
    }
}
