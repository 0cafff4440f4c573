use std::collections::HashSet;

use crate::algebra::field::FiniteField;
use crate::algebra::ring::Ring;

/// The n'th-power residues of a finite field and their complement.
///
/// Computed once per `(n, q)` and shared by every trial of a search: the
/// set answers "is f(a) an n'th power?" for the rational-point scan, and
/// the complement is the pool of admissible leading coefficients.
pub struct NthPowers<F: FiniteField> {
    exponent: u64,
    powers: HashSet<F::Element>,
    non_powers: Vec<F::Element>,
}

impl<F: FiniteField> NthPowers<F> {
    /// Image of `a ↦ a^n` over every element of the field.
    ///
    /// Zero is always included (`0^n = 0` for `n >= 1`). The complement
    /// keeps the field's enumeration order, so seeded sampling from it is
    /// reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use pointless::search::nth_powers::NthPowers;
    /// use pointless::GaloisField;
    ///
    /// let f13 = GaloisField::new(13).unwrap();
    /// let squares = NthPowers::compute(&f13, 2);
    /// assert_eq!(squares.len(), 7); // (13 - 1) / 2 + 1
    /// assert!(squares.contains(3)); // 4^2 = 16 = 3
    /// assert!(!squares.contains(2));
    /// ```
    pub fn compute(field: &F, n: u64) -> Self {
        let elements = field.elements();

        let mut powers = HashSet::with_capacity(elements.len());
        for &a in &elements {
            powers.insert(field.pow(a, n));
        }

        let non_powers = elements
            .into_iter()
            .filter(|a| !powers.contains(a))
            .collect();

        Self {
            exponent: n,
            powers,
            non_powers,
        }
    }

    /// The exponent `n`.
    pub fn exponent(&self) -> u64 {
        self.exponent
    }

    /// Check whether `a` is an n'th power.
    #[inline]
    pub fn contains(&self, a: F::Element) -> bool {
        self.powers.contains(&a)
    }

    /// Number of distinct n'th powers, zero included.
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Elements that are not n'th powers, in field enumeration order.
    pub fn non_powers(&self) -> &[F::Element] {
        &self.non_powers
    }
}
