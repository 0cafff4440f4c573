use rand::Rng;

use super::SearchError;
use crate::algebra::field::FiniteField;
use crate::structures::poly::Poly;

/// Random separable polynomials of a fixed degree with a restricted
/// leading coefficient.
///
/// Lower coefficients are uniform over the field; the leading coefficient
/// is uniform over the caller's pool (for the curve search, the non-n'th
/// powers). Draws are rejected until one is separable.
pub struct PolySampler<'a, F: FiniteField> {
    field: &'a F,
    degree: usize,
    leading: &'a [F::Element],
    draws: u64,
}

impl<'a, F: FiniteField> PolySampler<'a, F> {
    /// # Errors
    ///
    /// Returns `SearchError::EmptyLeadingSet` if `leading` is empty, since
    /// no polynomial of exact degree `degree` could ever be drawn.
    pub fn new(field: &'a F, degree: usize, leading: &'a [F::Element]) -> Result<Self, SearchError> {
        if leading.is_empty() {
            return Err(SearchError::EmptyLeadingSet { q: field.order() });
        }
        Ok(Self {
            field,
            degree,
            leading,
            draws: 0,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Total number of coefficient vectors drawn so far, rejected ones included.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// One coefficient vector, separable or not.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Poly<F> {
        self.draws += 1;

        let mut coeffs = Vec::with_capacity(self.degree + 1);
        for _ in 0..self.degree {
            coeffs.push(self.field.random(rng));
        }
        // `leading` is non-empty, checked in `new`
        let lead = self
            .field
            .random_from(rng, self.leading)
            .unwrap_or_else(|| self.leading[0]);
        coeffs.push(lead);

        Poly::new(self.field, coeffs)
    }

    /// A separable polynomial of exact degree `degree`.
    ///
    /// This loops until a separable draw appears and has no retry cap. Over
    /// GF(q) roughly a fraction `1 - 1/q` of monic polynomials are
    /// squarefree, so termination is immediate in practice.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Poly<F> {
        loop {
            let f = self.draw(rng);
            if f.is_separable(self.field) {
                return f;
            }
        }
    }
}
