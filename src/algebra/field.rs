use core::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::ring::Ring;

/// A (commutative) field.
///
/// Extends `Ring` with multiplicative inverses for all non-zero elements.
pub trait Field: Ring {
    /// Multiplicative inverse `a⁻¹`, if it exists.
    ///
    /// For a true field:
    /// - `a == zero`  ⇒  `None`
    /// - otherwise    ⇒  `Some(a⁻¹)`
    fn inverse(&self, a: Self::Element) -> Option<Self::Element>;

    /// Safe division: returns `None` on division by zero.
    #[inline]
    fn try_div(&self, a: Self::Element, b: Self::Element) -> Option<Self::Element> {
        self.inverse(b).map(|inv| self.mul(a, inv))
    }
}

/// A finite field F_q whose elements can be enumerated and sampled.
///
/// Every element has a stable integer encoding in `[0, q)`; zero is encoded
/// as `0` and one as `1`.
pub trait FiniteField: Field {
    /// Number of elements `q`.
    fn order(&self) -> u64;

    /// The characteristic `p` of the field.
    fn characteristic(&self) -> u64;

    /// Integer encoding of `a` in `[0, q)`.
    fn to_u64(&self, a: Self::Element) -> u64;

    /// Element with integer encoding `index`.
    ///
    /// Returns `None` if `index >= q`.
    fn from_index(&self, index: u64) -> Option<Self::Element>;

    /// Write a human-readable form of `a`.
    fn fmt_element(&self, a: Self::Element, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// All `q` elements, in ascending order of their encoding.
    fn elements(&self) -> Vec<Self::Element> {
        (0..self.order()).filter_map(|i| self.from_index(i)).collect()
    }

    /// A uniformly random element of the field.
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        let index = rng.gen_range(0..self.order());
        self.from_index(index).unwrap_or_else(|| self.zero())
    }

    /// A uniformly random element of `subset`.
    ///
    /// Returns `None` if `subset` is empty.
    fn random_from<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        subset: &[Self::Element],
    ) -> Option<Self::Element> {
        subset.choose(rng).copied()
    }
}
