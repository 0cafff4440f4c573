//! Randomized search for pointless superelliptic curves `y^n = f(x)`.
//!
//! The pipeline, leaf first:
//! - [`degrees`] and [`weil`]: which degrees `d` and field sizes `q` can
//!   carry a pointless curve of the requested genus
//! - [`nth_powers`]: the n'th-power residues of GF(q) and their complement
//! - [`sampler`]: random separable polynomials with a non-n'th-power leading
//!   coefficient, so the points at infinity are never rational
//! - [`pointless`]: the exhaustive rational-point test and the trial loop
//! - [`orchestrator`]: the (d, q) plan and its sequential / parallel runs
//! - [`report`]: plain-text rendering of a finished run

use crate::structures::gf::FieldError;

pub mod degrees;
pub mod nth_powers;
pub mod orchestrator;
pub mod pointless;
pub mod report;
pub mod sampler;
pub mod weil;

/// Error type for search parameters and preconditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("exponent n must be at least 2, got {0}")]
    InvalidExponent(u64),
    #[error("genus g must be at least 1, got {0}")]
    InvalidGenus(u64),
    #[error("genus {0} is too large for the degree bound")]
    GenusOverflow(u64),
    #[error("smallest field size must be at least 2, got {0}")]
    InvalidFieldStart(u64),
    #[error("trial budget must be at least 1")]
    InvalidTrialBudget,
    /// No element of GF(q) can serve as a leading coefficient; the
    /// rejection sampler would never terminate.
    #[error("no admissible leading coefficient in GF({q})")]
    EmptyLeadingSet { q: u64 },
    #[error(transparent)]
    Field(#[from] FieldError),
}
