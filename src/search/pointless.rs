use core::fmt;

use rand::Rng;
use tracing::{debug, warn};

use super::nth_powers::NthPowers;
use super::sampler::PolySampler;
use super::SearchError;
use crate::algebra::field::FiniteField;
use crate::structures::gf::GaloisField;
use crate::structures::poly::Poly;

/// Result of one `(n, q, d)` search.
pub enum SearchOutcome<F: FiniteField> {
    /// `y^n = f(x)` has no rational point over the field.
    Found(Poly<F>),
    /// Every trial in the budget hit a rational point. This says nothing
    /// about whether a pointless curve exists.
    NotFound,
}

impl<F: FiniteField> SearchOutcome<F> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// The witness polynomial, if one was found.
    pub fn polynomial(&self) -> Option<&Poly<F>> {
        match self {
            SearchOutcome::Found(f) => Some(f),
            SearchOutcome::NotFound => None,
        }
    }
}

impl<F: FiniteField> Clone for SearchOutcome<F> {
    fn clone(&self) -> Self {
        match self {
            SearchOutcome::Found(f) => SearchOutcome::Found(f.clone()),
            SearchOutcome::NotFound => SearchOutcome::NotFound,
        }
    }
}

impl<F: FiniteField> PartialEq for SearchOutcome<F> {
    fn eq(&self, other: &Self) -> bool {
        self.polynomial() == other.polynomial()
    }
}

impl<F: FiniteField> Eq for SearchOutcome<F> {}

impl<F: FiniteField> fmt::Debug for SearchOutcome<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(p) => f.debug_tuple("Found").field(p).finish(),
            SearchOutcome::NotFound => write!(f, "NotFound"),
        }
    }
}

/// First `x` in the field with `f(x)` an n'th power, i.e. an affine
/// rational point `(x, y)` on `y^n = f(x)`.
///
/// Scans the whole field in enumeration order and stops at the first hit.
pub fn rational_point<F: FiniteField>(
    field: &F,
    f: &Poly<F>,
    powers: &NthPowers<F>,
) -> Option<F::Element> {
    field
        .elements()
        .into_iter()
        .find(|&x| powers.contains(f.eval(field, x)))
}

/// Check that no `x` in the field makes `f(x)` an n'th power.
///
/// Together with a non-n'th-power leading coefficient (no rational point
/// above infinity) this certifies that `y^n = f(x)` is pointless.
pub fn is_pointless<F: FiniteField>(field: &F, f: &Poly<F>, powers: &NthPowers<F>) -> bool {
    rational_point(field, f, powers).is_none()
}

/// Trial loop for one field and exponent.
///
/// Holds the n'th-power set and the element list so that trials and
/// searches over several degrees reuse them.
pub struct PointlessSearch<'a, F: FiniteField> {
    field: &'a F,
    powers: NthPowers<F>,
    elements: Vec<F::Element>,
}

impl<'a, F: FiniteField> PointlessSearch<'a, F> {
    pub fn new(field: &'a F, n: u64) -> Self {
        Self {
            field,
            powers: NthPowers::compute(field, n),
            elements: field.elements(),
        }
    }

    pub fn powers(&self) -> &NthPowers<F> {
        &self.powers
    }

    /// The field's elements in enumeration order.
    pub fn elements(&self) -> &[F::Element] {
        &self.elements
    }

    /// Same as the free [`rational_point`], over the cached element list.
    pub fn rational_point(&self, f: &Poly<F>) -> Option<F::Element> {
        self.elements
            .iter()
            .copied()
            .find(|&x| self.powers.contains(f.eval(self.field, x)))
    }

    /// Draw up to `max_trials` separable degree-`degree` polynomials with a
    /// non-n'th-power leading coefficient and return the first one whose
    /// curve has no affine rational point.
    ///
    /// Every `Found` result has been checked against every element of the
    /// field. `genus` is only recorded in the logs.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::EmptyLeadingSet` when every element is an n'th
    /// power (e.g. `gcd(n, q - 1) = 1`).
    pub fn search<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        degree: usize,
        genus: u64,
        max_trials: u64,
    ) -> Result<SearchOutcome<F>, SearchError> {
        let q = self.field.order();
        let n = self.powers.exponent();
        let mut sampler = match PolySampler::new(self.field, degree, self.powers.non_powers()) {
            Ok(s) => s,
            Err(e) => {
                warn!(n, q, degree, "every field element is an n'th power");
                return Err(e);
            }
        };

        for trial in 1..=max_trials {
            let f = sampler.sample(rng);
            if self.rational_point(&f).is_none() {
                debug!(n, q, degree, genus, trial, draws = sampler.draws(), "pointless curve found");
                return Ok(SearchOutcome::Found(f));
            }
        }

        debug!(n, q, degree, genus, max_trials, draws = sampler.draws(), "trial budget exhausted");
        Ok(SearchOutcome::NotFound)
    }
}

/// Search GF(q) for a pointless `y^n = f(x)` with `deg f = degree`.
///
/// Builds the field and the n'th-power set, then runs
/// [`PointlessSearch::search`]. The field is returned so the caller can
/// interpret the coefficient encoding of a found polynomial.
///
/// # Errors
///
/// Returns `SearchError::InvalidExponent` for `n < 2`, a `FieldError` if
/// `q` is not a supported prime power, and `SearchError::EmptyLeadingSet`
/// if every element of GF(q) is an n'th power.
///
/// # Example
///
/// ```
/// use pointless::search::pointless::search_pointless;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let (field, outcome) = search_pointless(2, 3, 6, 2, 1000, &mut rng).unwrap();
/// if let Some(f) = outcome.polynomial() {
///     println!("y^2 = {}", f.display(&field));
/// }
/// ```
pub fn search_pointless<R: Rng + ?Sized>(
    n: u64,
    q: u64,
    degree: usize,
    genus: u64,
    max_trials: u64,
    rng: &mut R,
) -> Result<(GaloisField, SearchOutcome<GaloisField>), SearchError> {
    if n < 2 {
        return Err(SearchError::InvalidExponent(n));
    }
    let field = GaloisField::new(q)?;
    let outcome = PointlessSearch::new(&field, n).search(rng, degree, genus, max_trials)?;
    Ok((field, outcome))
}
