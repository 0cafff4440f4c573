//! Randomized search for pointless superelliptic curves `y^n = f(x)` over
//! finite fields, on top of a small runtime finite-field library.

pub mod algebra;
pub mod search;
pub mod structures;
pub mod utils;

pub use algebra::field::{Field, FiniteField};
pub use algebra::ring::Ring;

pub use structures::fp::PrimeField;
pub use structures::gf;
pub use structures::gf::{FieldError, GaloisField, Modulus};
pub use structures::poly::Poly;

pub use search::orchestrator::{Search, SearchConfig, SearchRecord};
pub use search::pointless::SearchOutcome;
pub use search::report::Report;
pub use search::SearchError;
pub use utils::{gcd, is_prime, is_prime_power};
