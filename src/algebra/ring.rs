use core::fmt::Debug;
use core::hash::Hash;

/// A commutative ring, given as a runtime context object.
///
/// The ring is chosen at run time (e.g. the field order `q` comes from the
/// command line), so the identities and operations live on the context and
/// elements are plain values interpreted by it.
///
/// This trait assumes:
/// - (R, +) is an abelian group with identity `zero()`
/// - (R, ·) is a commutative monoid with identity `one()`
/// - multiplication distributes over addition.
pub trait Ring {
    type Element: Copy + Eq + Hash + Debug;

    /// Additive identity.
    fn zero(&self) -> Self::Element;

    /// Multiplicative identity.
    fn one(&self) -> Self::Element;

    /// Image of the integer `n` under the canonical map Z -> R.
    fn from_u64(&self, n: u64) -> Self::Element;

    fn add(&self, a: Self::Element, b: Self::Element) -> Self::Element;

    fn sub(&self, a: Self::Element, b: Self::Element) -> Self::Element;

    fn neg(&self, a: Self::Element) -> Self::Element;

    fn mul(&self, a: Self::Element, b: Self::Element) -> Self::Element;

    #[inline]
    fn is_zero(&self, a: Self::Element) -> bool {
        a == self.zero()
    }

    /// Exponentiation by a non-negative integer using square-and-multiply.
    fn pow(&self, a: Self::Element, exp: u64) -> Self::Element {
        let mut base = a;
        let mut result = self.one();

        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            e >>= 1;
        }
        result
    }
}
