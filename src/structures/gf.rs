//! Finite fields GF(q) for a prime power `q` chosen at run time.
//!
//! This module provides:
//! - The `Modulus` struct for validated primitive polynomials over GF(p)
//! - The `GaloisField` context, which encodes elements as integers in `[0, q)`
//!   and multiplies through discrete log / antilog tables
//! - `find_primitive`, the deterministic search for a defining polynomial

use core::fmt;

use tracing::debug;

use crate::algebra::field::{Field, FiniteField};
use crate::algebra::ring::Ring;
use crate::structures::fp::PrimeField;
use crate::structures::poly::Poly;
use crate::utils::{gcd, prime_power};

/// Largest field order supported by [`GaloisField`].
///
/// The log / antilog tables take `8 * q` bytes.
pub const MAX_FIELD_ORDER: u64 = 1 << 22;

/// Error type for field construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is not prime")]
    NotPrime(u64),
    #[error("{0} is not a prime power")]
    NotPrimePower(u64),
    #[error("field order {order} exceeds the supported maximum {max}")]
    TooLarge { order: u64, max: u64 },
    /// The polynomial has the wrong degree.
    #[error("wrong degree: expected {expected}, got {got:?}")]
    WrongDegree { expected: usize, got: Option<usize> },
    /// The polynomial is not monic.
    #[error("polynomial is not monic")]
    NotMonic,
    /// The polynomial is not primitive.
    #[error("polynomial is not primitive")]
    NotPrimitive,
    #[error("no primitive polynomial of degree {degree} over GF({p})")]
    NoPrimitivePolynomial { p: u64, degree: usize },
}

/// A validated primitive polynomial over GF(p), used as a field modulus.
///
/// This struct wraps a polynomial that has been validated to be:
/// - Of the expected degree
/// - Monic (leading coefficient is 1)
/// - Primitive (when using `new()`), so its root generates GF(p^d)^*
#[derive(Clone, PartialEq, Eq)]
pub struct Modulus {
    base: PrimeField,
    poly: Poly<PrimeField>,
}

impl Modulus {
    /// Create a new validated modulus of the given degree.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::WrongDegree` if the degree is not `degree`.
    /// Returns `FieldError::NotMonic` if the leading coefficient is not 1.
    /// Returns `FieldError::NotPrimitive` if the polynomial is not primitive.
    pub fn new(base: PrimeField, poly: Poly<PrimeField>, degree: usize) -> Result<Self, FieldError> {
        let modulus = Self::new_unchecked(base, poly, degree)?;
        if !modulus.poly.is_primitive(&base) {
            return Err(FieldError::NotPrimitive);
        }
        Ok(modulus)
    }

    /// Create a new modulus, skipping the primitivity check.
    ///
    /// This still validates degree and monic properties. Use this when the
    /// polynomial comes from [`find_primitive`].
    pub fn new_unchecked(
        base: PrimeField,
        poly: Poly<PrimeField>,
        degree: usize,
    ) -> Result<Self, FieldError> {
        if poly.degree() != Some(degree) {
            return Err(FieldError::WrongDegree {
                expected: degree,
                got: poly.degree(),
            });
        }

        if poly.leading_coeff() != Some(base.one()) {
            return Err(FieldError::NotMonic);
        }

        Ok(Self { base, poly })
    }

    /// Get a reference to the underlying polynomial.
    pub fn poly(&self) -> &Poly<PrimeField> {
        &self.poly
    }

    /// Get the degree of the modulus.
    pub fn degree(&self) -> usize {
        self.poly.degree().unwrap_or(0)
    }
}

impl fmt::Debug for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modulus({})", self.poly.display(&self.base))
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.poly.display(&self.base))
    }
}

/// The finite field GF(q), q = p^k.
///
/// Elements are `u32` encodings in `[0, q)`: the base-p digits of an element
/// are the coefficients of its residue polynomial in the generator `a`, a
/// root of the primitive modulus. Zero encodes as `0` and one as `1`, and
/// the prime subfield GF(p) is exactly `[0, p)`.
///
/// Addition is digit-wise mod p. Multiplication, powers and inverses go
/// through discrete log / antilog tables built once at construction.
///
/// # Example
///
/// ```
/// use pointless::{Field, FiniteField, GaloisField, Ring};
///
/// let f9 = GaloisField::new(9).unwrap();
/// assert_eq!(f9.order(), 9);
/// assert_eq!(f9.characteristic(), 3);
///
/// let a = f9.generator();
/// assert_eq!(f9.pow(a, 8), f9.one());
/// assert_eq!(f9.mul(a, f9.inverse(a).unwrap()), f9.one());
/// ```
#[derive(Clone)]
pub struct GaloisField {
    base: PrimeField,
    degree: u32,
    order: u64,
    modulus: Modulus,
    /// `exp[i] = a^i` for `i` in `[0, q-1)`
    exp: Vec<u32>,
    /// `log[x]` is the discrete log of `x != 0`; `log[0]` is unused
    log: Vec<u32>,
}

impl GaloisField {
    /// Construct GF(q).
    ///
    /// The defining polynomial is the first monic primitive polynomial in a
    /// deterministic search, so the same `q` always gives the same encoding.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::TooLarge` if `q > MAX_FIELD_ORDER` and
    /// `FieldError::NotPrimePower` if `q` is not a prime power.
    pub fn new(q: u64) -> Result<Self, FieldError> {
        if q > MAX_FIELD_ORDER {
            return Err(FieldError::TooLarge {
                order: q,
                max: MAX_FIELD_ORDER,
            });
        }
        let (p, k) = prime_power(q).ok_or(FieldError::NotPrimePower(q))?;
        let base = PrimeField::new(p)?;

        let poly = find_primitive(&base, k as usize).ok_or(FieldError::NoPrimitivePolynomial {
            p,
            degree: k as usize,
        })?;
        let modulus = Modulus::new_unchecked(base, poly, k as usize)?;
        debug!(q, modulus = %modulus, "constructed field modulus");

        let (exp, log) = build_tables(&base, &modulus, q);

        Ok(Self {
            base,
            degree: k,
            order: q,
            modulus,
            exp,
            log,
        })
    }

    /// The prime subfield GF(p).
    pub fn base(&self) -> &PrimeField {
        &self.base
    }

    /// Extension degree `k` over the prime subfield.
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// The defining polynomial.
    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    /// A generator of the multiplicative group GF(q)^*.
    pub fn generator(&self) -> u32 {
        self.exp[1 % self.exp.len()]
    }

    /// Discrete logarithm to the base [`generator`](Self::generator).
    ///
    /// Returns `None` for zero.
    pub fn log(&self, a: u32) -> Option<u64> {
        (a != 0).then(|| self.log[a as usize] as u64)
    }

    /// Check whether `a` is an n'th power in GF(q).
    ///
    /// Zero is always an n'th power; a non-zero `a` is one exactly when its
    /// discrete log is divisible by `gcd(n, q - 1)`.
    pub fn is_nth_power(&self, a: u32, n: u64) -> bool {
        match self.log(a) {
            None => true,
            Some(l) => l % gcd(n, self.order - 1) == 0,
        }
    }

    #[inline]
    fn group_order(&self) -> u64 {
        self.order - 1
    }

    #[inline]
    fn digitwise(&self, a: u32, b: u32, op: impl Fn(u64, u64) -> u64) -> u32 {
        let p = self.base.modulus();
        let (mut x, mut y) = (a as u64, b as u64);
        let mut out = 0u64;
        let mut place = 1u64;
        for _ in 0..self.degree {
            out += op(x % p, y % p) * place;
            x /= p;
            y /= p;
            place *= p;
        }
        out as u32
    }
}

/// Build the antilog and log tables by repeated multiplication by the root
/// of the primitive modulus.
fn build_tables(base: &PrimeField, modulus: &Modulus, q: u64) -> (Vec<u32>, Vec<u32>) {
    let p = base.modulus();
    let k = modulus.degree();
    let m = modulus.poly().coefficients();

    let mut exp = Vec::with_capacity((q - 1) as usize);
    let mut log = vec![0u32; q as usize];

    // digits of a^i, ascending
    let mut cur = vec![0u64; k];
    cur[0] = 1;

    for i in 0..q - 1 {
        let code = cur.iter().rev().fold(0u64, |acc, &d| acc * p + d);
        exp.push(code as u32);
        log[code as usize] = i as u32;

        // cur *= a, reducing a^k = -(m_0 + m_1 a + ... + m_{k-1} a^{k-1})
        let carry = cur[k - 1];
        for j in (1..k).rev() {
            cur[j] = cur[j - 1];
        }
        cur[0] = 0;
        for (j, digit) in cur.iter_mut().enumerate() {
            *digit = base.sub(*digit, base.mul(carry, m[j]));
        }
    }

    (exp, log)
}

impl Ring for GaloisField {
    type Element = u32;

    #[inline]
    fn zero(&self) -> u32 {
        0
    }

    #[inline]
    fn one(&self) -> u32 {
        1
    }

    #[inline]
    fn from_u64(&self, n: u64) -> u32 {
        (n % self.base.modulus()) as u32
    }

    #[inline]
    fn add(&self, a: u32, b: u32) -> u32 {
        if self.degree == 1 {
            return self.base.add(a as u64, b as u64) as u32;
        }
        let p = self.base.modulus();
        self.digitwise(a, b, |x, y| (x + y) % p)
    }

    #[inline]
    fn sub(&self, a: u32, b: u32) -> u32 {
        if self.degree == 1 {
            return self.base.sub(a as u64, b as u64) as u32;
        }
        let p = self.base.modulus();
        self.digitwise(a, b, |x, y| (x + p - y) % p)
    }

    #[inline]
    fn neg(&self, a: u32) -> u32 {
        self.sub(0, a)
    }

    #[inline]
    fn mul(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        let l = (self.log[a as usize] as u64 + self.log[b as usize] as u64) % self.group_order();
        self.exp[l as usize]
    }

    fn pow(&self, a: u32, exp: u64) -> u32 {
        if exp == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let n = self.group_order();
        let l = (self.log[a as usize] as u64 * (exp % n)) % n;
        self.exp[l as usize]
    }
}

impl Field for GaloisField {
    fn inverse(&self, a: u32) -> Option<u32> {
        if a == 0 {
            return None;
        }
        let n = self.group_order();
        let l = (n - self.log[a as usize] as u64) % n;
        Some(self.exp[l as usize])
    }
}

impl FiniteField for GaloisField {
    fn order(&self) -> u64 {
        self.order
    }

    fn characteristic(&self) -> u64 {
        self.base.modulus()
    }

    fn to_u64(&self, a: u32) -> u64 {
        a as u64
    }

    fn from_index(&self, index: u64) -> Option<u32> {
        (index < self.order).then_some(index as u32)
    }

    /// Prime-field elements print as integers; others as polynomials in the
    /// generator `a`, e.g. `(2*a + 1)`.
    fn fmt_element(&self, a: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.base.modulus();
        if (a as u64) < p {
            return write!(f, "{}", a);
        }

        let mut digits = Vec::with_capacity(self.degree as usize);
        let mut x = a as u64;
        for _ in 0..self.degree {
            digits.push(x % p);
            x /= p;
        }

        let terms: Vec<String> = digits
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, d)| **d != 0)
            .map(|(i, &d)| match (i, d) {
                (0, _) => format!("{}", d),
                (1, 1) => "a".to_string(),
                (1, _) => format!("{}*a", d),
                (_, 1) => format!("a^{}", i),
                _ => format!("{}*a^{}", d, i),
            })
            .collect();

        if terms.len() == 1 {
            write!(f, "{}", terms[0])
        } else {
            write!(f, "({})", terms.join(" + "))
        }
    }
}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaloisField")
            .field("order", &self.order)
            .field("modulus", &self.modulus)
            .finish()
    }
}

impl fmt::Display for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.order)
    }
}

/// Returns the first monic primitive polynomial of the given degree over GF(p).
///
/// For degree 1 this is `x - g` with `g` the smallest primitive root.
/// Otherwise the lower coefficients are enumerated in lexicographic order
/// of their base-p encoding, so the result is deterministic.
///
/// Returns `None` for degree 0 or when `p^degree` overflows.
///
/// # Example
///
/// ```
/// use pointless::gf::find_primitive;
/// use pointless::PrimeField;
///
/// let f3 = PrimeField::new(3).unwrap();
/// let poly = find_primitive(&f3, 2).unwrap();
/// assert!(poly.is_primitive(&f3));
/// assert_eq!(poly.degree(), Some(2));
/// ```
pub fn find_primitive(base: &PrimeField, degree: usize) -> Option<Poly<PrimeField>> {
    let p = base.modulus();
    match degree {
        0 => return None,
        1 => {
            let g = base.primitive_root();
            return Some(Poly::new(base, vec![base.neg(g), base.one()]));
        }
        _ => {}
    }

    let count = p.checked_pow(degree as u32)?;
    (0..count).find_map(|index| {
        let mut coeffs = Vec::with_capacity(degree + 1);
        let mut rest = index;
        for _ in 0..degree {
            coeffs.push(rest % p);
            rest /= p;
        }
        coeffs.push(base.one());

        // a zero constant term means x divides the polynomial
        if coeffs[0] == 0 {
            return None;
        }
        let poly = Poly::new(base, coeffs);
        poly.is_primitive(base).then_some(poly)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Modulus tests ----

    fn f3() -> PrimeField {
        PrimeField::new(3).unwrap()
    }

    #[test]
    fn modulus_new_valid() {
        let poly = Poly::new(&f3(), vec![2, 2, 1]); // x^2 + 2x + 2
        assert!(Modulus::new(f3(), poly, 2).is_ok());
    }

    #[test]
    fn modulus_new_wrong_degree() {
        let poly = Poly::new(&f3(), vec![2, 2, 1]);
        assert!(matches!(
            Modulus::new(f3(), poly, 3),
            Err(FieldError::WrongDegree {
                expected: 3,
                got: Some(2)
            })
        ));
    }

    #[test]
    fn modulus_new_not_monic() {
        let poly = Poly::new(&f3(), vec![1, 0, 2]);
        assert_eq!(Modulus::new(f3(), poly, 2), Err(FieldError::NotMonic));
    }

    #[test]
    fn modulus_new_not_primitive() {
        // x^2 + 1 is irreducible over F_3 but x has order 4
        let poly = Poly::new(&f3(), vec![1, 0, 1]);
        assert_eq!(Modulus::new(f3(), poly.clone(), 2), Err(FieldError::NotPrimitive));
        assert!(Modulus::new_unchecked(f3(), poly, 2).is_ok());
    }

    #[test]
    fn find_primitive_degrees() {
        for (p, k) in [(2u64, 1usize), (2, 3), (2, 8), (3, 2), (5, 2), (7, 3), (13, 1)] {
            let base = PrimeField::new(p).unwrap();
            let poly = find_primitive(&base, k).unwrap();
            assert_eq!(poly.degree(), Some(k));
            assert!(poly.is_primitive(&base), "p = {}, k = {}", p, k);
        }
        assert!(find_primitive(&f3(), 0).is_none());
    }

    // ---- GaloisField tests ----

    #[test]
    fn rejects_non_prime_powers() {
        assert_eq!(GaloisField::new(6).unwrap_err(), FieldError::NotPrimePower(6));
        assert_eq!(GaloisField::new(1).unwrap_err(), FieldError::NotPrimePower(1));
        assert_eq!(GaloisField::new(0).unwrap_err(), FieldError::NotPrimePower(0));
        assert!(matches!(
            GaloisField::new(MAX_FIELD_ORDER + 1),
            Err(FieldError::TooLarge { .. })
        ));
    }

    #[test]
    fn builds_small_fields() {
        for q in [2u64, 3, 4, 5, 7, 8, 9, 16, 25, 27, 49, 121, 125] {
            let f = GaloisField::new(q).unwrap();
            assert_eq!(f.order(), q);
            assert_eq!(f.elements().len() as u64, q);
        }
    }

    #[test]
    fn prime_field_matches_integers() {
        let f = GaloisField::new(13).unwrap();
        let fp = PrimeField::new(13).unwrap();
        for a in 0..13u32 {
            for b in 0..13u32 {
                assert_eq!(f.add(a, b) as u64, fp.add(a as u64, b as u64));
                assert_eq!(f.mul(a, b) as u64, fp.mul(a as u64, b as u64));
            }
        }
    }

    #[test]
    fn field_axioms_exhaustive_f9() {
        let f = GaloisField::new(9).unwrap();
        let elems = f.elements();
        for &a in &elems {
            assert_eq!(f.add(a, f.zero()), a);
            assert_eq!(f.mul(a, f.one()), a);
            assert_eq!(f.add(a, f.neg(a)), 0);
            for &b in &elems {
                assert_eq!(f.add(a, b), f.add(b, a));
                assert_eq!(f.mul(a, b), f.mul(b, a));
                assert_eq!(f.sub(f.add(a, b), b), a);
                for &c in &elems {
                    assert_eq!(
                        f.mul(a, f.add(b, c)),
                        f.add(f.mul(a, b), f.mul(a, c)),
                        "distributivity failed for {}, {}, {}",
                        a,
                        b,
                        c
                    );
                }
            }
        }
    }

    #[test]
    fn inverse_all_nonzero() {
        let f = GaloisField::new(27).unwrap();
        for a in 1..27u32 {
            let inv = f.inverse(a).unwrap();
            assert_eq!(f.mul(a, inv), 1, "inverse({}) failed", a);
        }
        assert_eq!(f.inverse(0), None);
    }

    #[test]
    fn pow_fermat() {
        let f = GaloisField::new(25).unwrap();
        for a in 1..25u32 {
            assert_eq!(f.pow(a, 24), 1);
            assert_eq!(f.pow(a, 25), a);
        }
        assert_eq!(f.pow(0, 0), 1);
        assert_eq!(f.pow(0, 3), 0);
    }

    #[test]
    fn pow_matches_repeated_mul() {
        let f = GaloisField::new(16).unwrap();
        for a in 0..16u32 {
            let mut acc = 1;
            for e in 0..20u64 {
                assert_eq!(f.pow(a, e), acc);
                acc = f.mul(acc, a);
            }
        }
    }

    #[test]
    fn characteristic_kills_p_multiples() {
        let f = GaloisField::new(49).unwrap();
        for a in f.elements() {
            let mut sum = 0;
            for _ in 0..7 {
                sum = f.add(sum, a);
            }
            assert_eq!(sum, 0);
        }
    }

    #[test]
    fn frobenius_is_additive() {
        let f = GaloisField::new(8).unwrap();
        for a in 0..8u32 {
            for b in 0..8u32 {
                assert_eq!(f.pow(f.add(a, b), 2), f.add(f.pow(a, 2), f.pow(b, 2)));
            }
        }
    }

    #[test]
    fn generator_has_full_order() {
        let f = GaloisField::new(9).unwrap();
        let g = f.generator();
        let mut seen = std::collections::HashSet::new();
        let mut x = 1;
        for _ in 0..8 {
            seen.insert(x);
            x = f.mul(x, g);
        }
        assert_eq!(seen.len(), 8);
        assert_eq!(GaloisField::new(2).unwrap().generator(), 1);
    }

    #[test]
    fn nth_power_test() {
        let f = GaloisField::new(13).unwrap();
        // squares mod 13: 0, 1, 3, 4, 9, 10, 12
        let squares: Vec<u32> = (0..13).filter(|&a| f.is_nth_power(a, 2)).collect();
        assert_eq!(squares, vec![0, 1, 3, 4, 9, 10, 12]);
        // gcd(5, 12) = 1: every element is a fifth power
        assert!((0..13).all(|a| f.is_nth_power(a, 5)));
    }

    #[test]
    fn deterministic_construction() {
        let a = GaloisField::new(81).unwrap();
        let b = GaloisField::new(81).unwrap();
        assert_eq!(a.modulus(), b.modulus());
        assert_eq!(a.generator(), b.generator());
    }

    #[test]
    fn display_elements() {
        struct Show<'a>(&'a GaloisField, u32);
        impl fmt::Display for Show<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt_element(self.1, f)
            }
        }

        let f = GaloisField::new(9).unwrap();
        assert_eq!(Show(&f, 2).to_string(), "2");
        assert_eq!(Show(&f, 3).to_string(), "a");
        assert_eq!(Show(&f, 7).to_string(), "(2*a + 1)");
        assert_eq!(f.to_string(), "GF(9)");
    }
}
