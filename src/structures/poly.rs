use core::fmt;
use core::hash::{Hash, Hasher};

use crate::algebra::field::{Field, FiniteField};
use crate::algebra::ring::Ring;
use crate::utils::prime_divisors;

/// Polynomial over a runtime ring `F`.
///
/// Coefficients are stored in ascending order of degree:
/// `coeffs[i]` is the coefficient of `x^i`.
///
/// The zero polynomial is represented as an empty coefficient vector.
/// Every operation takes the ring context explicitly, since the
/// coefficients alone do not know which field they live in.
pub struct Poly<F: Ring> {
    coeffs: Vec<F::Element>,
}

impl<F: Ring> Poly<F> {
    /// Create a polynomial from coefficients in ascending order.
    ///
    /// `coeffs[i]` is the coefficient of `x^i`.
    /// Trailing zeros are automatically removed.
    ///
    /// # Example
    ///
    /// ```
    /// use pointless::{Poly, PrimeField};
    ///
    /// let f17 = PrimeField::new(17).unwrap();
    ///
    /// // 3 + 2x + x^2
    /// let p = Poly::new(&f17, vec![3, 2, 1]);
    /// assert_eq!(p.degree(), Some(2));
    /// ```
    pub fn new(field: &F, coeffs: Vec<F::Element>) -> Self {
        let mut poly = Self { coeffs };
        poly.normalize(field);
        poly
    }

    /// Create the zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// Create a constant polynomial.
    pub fn constant(field: &F, c: F::Element) -> Self {
        if field.is_zero(c) {
            Self::zero()
        } else {
            Self { coeffs: vec![c] }
        }
    }

    /// Create the polynomial `x`.
    pub fn x(field: &F) -> Self {
        Self {
            coeffs: vec![field.zero(), field.one()],
        }
    }

    /// Create a monomial `c * x^n`.
    pub fn monomial(field: &F, c: F::Element, n: usize) -> Self {
        if field.is_zero(c) {
            return Self::zero();
        }
        let mut coeffs = vec![field.zero(); n + 1];
        coeffs[n] = c;
        Self { coeffs }
    }

    /// Check if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Get the degree of the polynomial.
    ///
    /// Returns `None` for the zero polynomial, `Some(n)` otherwise
    /// where `n` is the highest power with a non-zero coefficient.
    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    /// Get the leading coefficient.
    ///
    /// Returns `None` for the zero polynomial.
    pub fn leading_coeff(&self) -> Option<F::Element> {
        self.coeffs.last().copied()
    }

    /// Get the coefficient of `x^i`.
    ///
    /// Returns zero if `i` is beyond the polynomial's degree.
    pub fn coeff(&self, field: &F, i: usize) -> F::Element {
        self.coeffs.get(i).copied().unwrap_or_else(|| field.zero())
    }

    /// Get a slice of all coefficients.
    pub fn coefficients(&self) -> &[F::Element] {
        &self.coeffs
    }

    /// Evaluate the polynomial at a point using Horner's method.
    ///
    /// # Example
    ///
    /// ```
    /// use pointless::{Poly, PrimeField};
    ///
    /// let f17 = PrimeField::new(17).unwrap();
    ///
    /// // p(x) = 1 + 2x + 3x^2
    /// let p = Poly::new(&f17, vec![1, 2, 3]);
    ///
    /// // p(2) = 1 + 4 + 12 = 17 ≡ 0 (mod 17)
    /// assert_eq!(p.eval(&f17, 2), 0);
    /// assert_eq!(p.eval(&f17, 1), 6);
    /// ```
    pub fn eval(&self, field: &F, x: F::Element) -> F::Element {
        let mut result = field.zero();
        for &coeff in self.coeffs.iter().rev() {
            result = field.add(field.mul(result, x), coeff);
        }
        result
    }

    /// Remove trailing zero coefficients.
    fn normalize(&mut self, field: &F) {
        while let Some(&last) = self.coeffs.last() {
            if !field.is_zero(last) {
                break;
            }
            self.coeffs.pop();
        }
    }

    pub fn add(&self, field: &F, rhs: &Self) -> Self {
        let max_len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..max_len)
            .map(|i| field.add(self.coeff(field, i), rhs.coeff(field, i)))
            .collect();
        Self::new(field, coeffs)
    }

    pub fn sub(&self, field: &F, rhs: &Self) -> Self {
        let max_len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..max_len)
            .map(|i| field.sub(self.coeff(field, i), rhs.coeff(field, i)))
            .collect();
        Self::new(field, coeffs)
    }

    pub fn neg(&self, field: &F) -> Self {
        let coeffs = self.coeffs.iter().map(|&c| field.neg(c)).collect();
        Self { coeffs }
    }

    /// Polynomial multiplication using naive O(n*m) convolution.
    pub fn mul(&self, field: &F, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }

        let n = self.coeffs.len();
        let m = rhs.coeffs.len();
        let mut coeffs = vec![field.zero(); n + m - 1];

        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] = field.add(coeffs[i + j], field.mul(a, b));
            }
        }

        Self::new(field, coeffs)
    }

    /// Scalar multiplication: polynomial * field element.
    pub fn scale(&self, field: &F, c: F::Element) -> Self {
        let coeffs = self.coeffs.iter().map(|&a| field.mul(a, c)).collect();
        Self::new(field, coeffs)
    }

    /// Compute the formal derivative of this polynomial.
    ///
    /// The derivative of a_n x^n + ... + a_1 x + a_0 is
    /// n*a_n x^{n-1} + ... + a_1, with the integer factors taken in `F`.
    /// In characteristic `p` the terms whose exponent is a multiple of `p` vanish.
    ///
    /// # Example
    ///
    /// ```
    /// use pointless::{Poly, PrimeField};
    ///
    /// let f17 = PrimeField::new(17).unwrap();
    ///
    /// // f(x) = x^3 + 2x^2 + 3x + 4  =>  f'(x) = 3x^2 + 4x + 3
    /// let f = Poly::new(&f17, vec![4, 3, 2, 1]);
    /// assert_eq!(f.derivative(&f17), Poly::new(&f17, vec![3, 4, 3]));
    /// ```
    pub fn derivative(&self, field: &F) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }

        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| field.mul(c, field.from_u64(i as u64)))
            .collect();

        Self::new(field, coeffs)
    }

    /// Write the polynomial in descending powers of `x`.
    ///
    /// Returns a value implementing `Display`.
    ///
    /// # Example
    ///
    /// ```
    /// use pointless::{Poly, PrimeField};
    ///
    /// let f7 = PrimeField::new(7).unwrap();
    /// let p = Poly::new(&f7, vec![3, 1, 0, 2]);
    /// assert_eq!(p.display(&f7).to_string(), "2*x^3 + x + 3");
    /// ```
    pub fn display<'a>(&'a self, field: &'a F) -> PolyDisplay<'a, F>
    where
        F: FiniteField,
    {
        PolyDisplay { poly: self, field }
    }
}

impl<F: Field> Poly<F> {
    /// Make the polynomial monic (leading coefficient = 1).
    ///
    /// Returns `None` if the polynomial is zero.
    pub fn monic(&self, field: &F) -> Option<Self> {
        let lc = self.leading_coeff()?;
        let inv = field.inverse(lc)?;
        Some(self.scale(field, inv))
    }

    /// Euclidean division: compute quotient and remainder.
    ///
    /// Returns `(q, r)` such that `self = q * divisor + r` and `deg(r) < deg(divisor)`.
    ///
    /// Returns `None` if the divisor is zero.
    pub fn div_rem(&self, field: &F, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_deg = divisor.degree()?;

        // If dividend degree < divisor degree, quotient is 0
        match self.degree() {
            None => return Some((Self::zero(), Self::zero())),
            Some(d) if d < divisor_deg => return Some((Self::zero(), self.clone())),
            _ => {}
        }

        let lc_inv = field.inverse(divisor.leading_coeff()?)?;
        let mut remainder = self.clone();
        let mut quotient_coeffs =
            vec![field.zero(); self.coeffs.len() - divisor.coeffs.len() + 1];

        while let Some(rem_deg) = remainder.degree() {
            if rem_deg < divisor_deg {
                break;
            }

            let rem_lc = remainder.leading_coeff()?;
            let coeff = field.mul(rem_lc, lc_inv);
            let deg_diff = rem_deg - divisor_deg;

            quotient_coeffs[deg_diff] = coeff;

            // remainder -= coeff * x^deg_diff * divisor
            for (i, &d_coeff) in divisor.coeffs.iter().enumerate() {
                let slot = &mut remainder.coeffs[i + deg_diff];
                *slot = field.sub(*slot, field.mul(coeff, d_coeff));
            }
            remainder.normalize(field);
        }

        Some((Self::new(field, quotient_coeffs), remainder))
    }

    /// Compute the remainder of division.
    ///
    /// Returns `None` if the divisor is zero.
    pub fn rem(&self, field: &F, divisor: &Self) -> Option<Self> {
        self.div_rem(field, divisor).map(|(_, r)| r)
    }

    /// Compute the greatest common divisor of two polynomials.
    ///
    /// The result is monic (leading coefficient = 1) unless both inputs are zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pointless::{Poly, PrimeField};
    ///
    /// let f17 = PrimeField::new(17).unwrap();
    ///
    /// // gcd((x-1)(x-2), (x-2)(x-3)) = x - 2
    /// let p1 = Poly::new(&f17, vec![2, 14, 1]);
    /// let p2 = Poly::new(&f17, vec![6, 12, 1]);
    /// let g = Poly::gcd(&f17, &p1, &p2);
    /// assert_eq!(g, Poly::new(&f17, vec![15, 1]));
    /// ```
    pub fn gcd(field: &F, a: &Self, b: &Self) -> Self {
        let mut a = a.clone();
        let mut b = b.clone();
        while !b.is_zero() {
            let r = a.rem(field, &b).unwrap_or_else(Self::zero);
            a = b;
            b = r;
        }
        a.monic(field).unwrap_or_else(Self::zero)
    }

    /// Compute `base^exp mod self` using repeated squaring.
    ///
    /// Returns `None` if self is zero.
    pub fn powmod(&self, field: &F, base: &Self, exp: u64) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        let mut b = base.rem(field, self)?;
        let mut result = Self::constant(field, field.one()).rem(field, self)?;
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(field, &b).rem(field, self)?;
            }
            b = b.mul(field, &b).rem(field, self)?;
            e >>= 1;
        }

        Some(result)
    }

    /// Check if the polynomial has no repeated roots over the algebraic closure.
    ///
    /// Equivalent to `gcd(f, f')` being a non-zero constant. The zero
    /// polynomial is not separable; non-zero constants are.
    ///
    /// # Example
    ///
    /// ```
    /// use pointless::{Poly, PrimeField};
    ///
    /// let f17 = PrimeField::new(17).unwrap();
    ///
    /// // (x - 1)^2 has a double root
    /// let square = Poly::new(&f17, vec![1, 15, 1]);
    /// assert!(!square.is_separable(&f17));
    ///
    /// // (x - 1)(x - 2) does not
    /// let product = Poly::new(&f17, vec![2, 14, 1]);
    /// assert!(product.is_separable(&f17));
    /// ```
    pub fn is_separable(&self, field: &F) -> bool {
        if self.is_zero() {
            return false;
        }
        let g = Self::gcd(field, self, &self.derivative(field));
        g.degree() == Some(0)
    }
}

impl<F: FiniteField> Poly<F> {
    /// Test if this polynomial is irreducible over F_q using Rabin's algorithm.
    ///
    /// A polynomial f(x) of degree n over F_q is irreducible if and only if:
    /// 1. `x^{q^n} ≡ x (mod f(x))`
    /// 2. `gcd(x^{q^{n/r}} - x, f(x)) = 1` for each prime divisor r of n
    ///
    /// Returns `false` for constant or zero polynomials.
    pub fn is_irreducible(&self, field: &F) -> bool {
        let n = match self.degree() {
            None | Some(0) => return false,
            Some(1) => return true,
            Some(d) => d,
        };

        let f = match self.monic(field) {
            Some(m) => m,
            None => return false,
        };

        let x = Self::x(field);
        let q = field.order();
        let divisors = prime_divisors(n as u64);

        // h = x^{q^i} mod f
        let mut h = x.clone();
        for i in 1..=n {
            h = match f.powmod(field, &h, q) {
                Some(r) => r,
                None => return false,
            };

            for &r in &divisors {
                if n as u64 == i as u64 * r {
                    let g = Self::gcd(field, &h.sub(field, &x), &f);
                    if g.degree() != Some(0) {
                        return false;
                    }
                }
            }
        }

        h.sub(field, &x).is_zero()
    }

    /// Test if this polynomial is primitive over F_q.
    ///
    /// A polynomial f(x) of degree n is primitive if it is irreducible and
    /// x has multiplicative order exactly `q^n - 1` in F_q[x]/(f(x)).
    ///
    /// Returns `false` if `q^n - 1` does not fit in a `u64`.
    pub fn is_primitive(&self, field: &F) -> bool {
        if !self.is_irreducible(field) {
            return false;
        }

        let n = match self.degree() {
            Some(d) if d > 0 => d,
            _ => return false,
        };

        let f = match self.monic(field) {
            Some(m) => m,
            None => return false,
        };

        let order = match field_order(field.order(), n) {
            Some(o) => o,
            None => return false,
        };

        let x = Self::x(field);
        let one = Self::constant(field, field.one());

        match f.powmod(field, &x, order) {
            Some(r) if r == one => {}
            _ => return false,
        }

        prime_divisors(order)
            .into_iter()
            .all(|r| f.powmod(field, &x, order / r).is_some_and(|h| h != one))
    }
}

/// Compute q^n - 1, returning None on overflow.
fn field_order(q: u64, n: usize) -> Option<u64> {
    let mut result: u64 = 1;
    for _ in 0..n {
        result = result.checked_mul(q)?;
    }
    result.checked_sub(1)
}

impl<F: FiniteField> Poly<F> {
    /// Build a polynomial from the integer encodings of its coefficients.
    ///
    /// Returns `None` if any encoding is out of range for the field.
    pub fn from_encoding(field: &F, values: &[u64]) -> Option<Self> {
        let coeffs = values
            .iter()
            .map(|&v| field.from_index(v))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(field, coeffs))
    }

    /// Integer encodings of the coefficients, ascending.
    pub fn encoding(&self, field: &F) -> Vec<u64> {
        self.coeffs.iter().map(|&c| field.to_u64(c)).collect()
    }
}

impl<F: Ring> Clone for Poly<F> {
    fn clone(&self) -> Self {
        Self {
            coeffs: self.coeffs.clone(),
        }
    }
}

impl<F: Ring> PartialEq for Poly<F> {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs
    }
}

impl<F: Ring> Eq for Poly<F> {}

impl<F: Ring> Hash for Poly<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coeffs.hash(state);
    }
}

impl<F: Ring> fmt::Debug for Poly<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Poly").field(&self.coeffs).finish()
    }
}

/// Human-readable rendering of a [`Poly`], produced by [`Poly::display`].
pub struct PolyDisplay<'a, F: FiniteField> {
    poly: &'a Poly<F>,
    field: &'a F,
}

impl<F: FiniteField> fmt::Display for PolyDisplay<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.poly.is_zero() {
            return write!(f, "0");
        }

        let one = self.field.one();
        let mut first = true;
        for (i, &coeff) in self.poly.coeffs.iter().enumerate().rev() {
            if self.field.is_zero(coeff) {
                continue;
            }

            if !first {
                write!(f, " + ")?;
            }
            first = false;

            if i == 0 || coeff != one {
                self.field.fmt_element(coeff, f)?;
                if i > 0 {
                    write!(f, "*")?;
                }
            }
            match i {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", i)?,
            }
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<F: Ring> serde::Serialize for Poly<F>
where
    F::Element: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as a vector of coefficients, ascending
        self.coeffs.serialize(serializer)
    }
}
