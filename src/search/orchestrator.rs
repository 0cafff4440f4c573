use std::collections::HashMap;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::info;

use super::degrees::possible_degrees;
use super::pointless::{PointlessSearch, SearchOutcome};
use super::weil::{field_cutoff, weil_bound};
use super::SearchError;
use crate::structures::gf::{FieldError, GaloisField, MAX_FIELD_ORDER};
use crate::utils::is_prime_power;

const DEFAULT_Q_START: u64 = 2;
const DEFAULT_MAX_TRIALS: u64 = 1_000_000;

/// Parameters of one search run.
///
/// Loadable from TOML with the `serde` feature; `q_start` and `max_trials`
/// fall back to 2 and 1 000 000 when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// `n` in `y^n = f(x)`.
    pub exponent: u64,
    /// Target genus `g`.
    pub genus: u64,
    #[cfg_attr(feature = "serde", serde(default = "default_q_start"))]
    pub q_start: u64,
    #[cfg_attr(feature = "serde", serde(default = "default_max_trials"))]
    pub max_trials: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

#[cfg(feature = "serde")]
fn default_q_start() -> u64 {
    DEFAULT_Q_START
}

#[cfg(feature = "serde")]
fn default_max_trials() -> u64 {
    DEFAULT_MAX_TRIALS
}

impl SearchConfig {
    /// Config with the default field start, trial budget and no seed.
    pub fn new(exponent: u64, genus: u64) -> Self {
        Self {
            exponent,
            genus,
            q_start: DEFAULT_Q_START,
            max_trials: DEFAULT_MAX_TRIALS,
            seed: None,
        }
    }

    pub fn with_q_start(mut self, q_start: u64) -> Self {
        self.q_start = q_start;
        self
    }

    pub fn with_max_trials(mut self, max_trials: u64) -> Self {
        self.max_trials = max_trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject `n < 2`, `g < 1`, `q_start < 2` and a zero trial budget.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.exponent < 2 {
            return Err(SearchError::InvalidExponent(self.exponent));
        }
        if self.genus < 1 {
            return Err(SearchError::InvalidGenus(self.genus));
        }
        if self.q_start < 2 {
            return Err(SearchError::InvalidFieldStart(self.q_start));
        }
        if self.max_trials < 1 {
            return Err(SearchError::InvalidTrialBudget);
        }
        Ok(())
    }
}

/// One `(d, q)` pair of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Task {
    pub degree: u64,
    pub order: u64,
}

/// Result of one task.
#[derive(Debug, Clone)]
pub struct SearchRecord {
    pub degree: u64,
    pub order: u64,
    /// The field the outcome's coefficients live in.
    pub field: Arc<GaloisField>,
    pub outcome: SearchOutcome<GaloisField>,
}

/// A validated search plan for fixed `(n, g)`.
///
/// Tasks are grouped by degree (ascending) and, within a degree, by
/// ascending field size. Every run, sequential or parallel, reports in
/// that order.
#[derive(Debug, Clone)]
pub struct Search {
    config: SearchConfig,
    bound: f64,
    cutoff: u64,
    degrees: Vec<u64>,
    orders: Vec<u64>,
    tasks: Vec<Task>,
}

impl Search {
    /// Compute the Weil bound, the admissible degrees and the field sizes.
    ///
    /// Field sizes are the prime powers `q` with `q_start <= q <=
    /// floor(bound)` and `q ≡ 1 (mod n)`.
    ///
    /// # Errors
    ///
    /// Returns the first failing check of [`SearchConfig::validate`], and
    /// `FieldError::TooLarge` when `floor(bound)` exceeds
    /// [`MAX_FIELD_ORDER`], before any field size is enumerated.
    pub fn plan(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let n = config.exponent;

        let bound = weil_bound(config.genus)?;
        let cutoff = field_cutoff(config.genus)?;
        if cutoff > MAX_FIELD_ORDER {
            return Err(FieldError::TooLarge {
                order: cutoff,
                max: MAX_FIELD_ORDER,
            }
            .into());
        }
        let degrees = possible_degrees(n, config.genus)?;
        let orders: Vec<u64> = (config.q_start..=cutoff)
            .filter(|&q| q % n == 1 && is_prime_power(q))
            .collect();

        let tasks = degrees
            .iter()
            .flat_map(|&degree| orders.iter().map(move |&order| Task { degree, order }))
            .collect::<Vec<_>>();

        info!(
            n,
            g = config.genus,
            bound,
            degrees = ?degrees,
            orders = ?orders,
            tasks = tasks.len(),
            "search planned"
        );

        Ok(Self {
            config,
            bound,
            cutoff,
            degrees,
            orders,
            tasks,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The real-valued Weil cutoff for the configured genus.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Largest field size in the plan, `floor(bound)`.
    pub fn cutoff(&self) -> u64 {
        self.cutoff
    }

    pub fn degrees(&self) -> &[u64] {
        &self.degrees
    }

    /// Field sizes searched for every degree.
    pub fn orders(&self) -> &[u64] {
        &self.orders
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Lazy sequential run drawing all randomness from `rng`.
    ///
    /// Nothing is searched until the iterator is advanced. Calling `iter`
    /// again starts a fresh pass over the plan.
    pub fn iter<'a, R: Rng + ?Sized>(&'a self, rng: &'a mut R) -> SearchIter<'a, R> {
        SearchIter {
            search: self,
            rng,
            next: 0,
            fields: HashMap::new(),
        }
    }

    /// Run every task sequentially, stopping at the first error.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<SearchRecord>, SearchError> {
        self.iter(rng).collect()
    }

    /// Run every task on the rayon pool.
    ///
    /// Task `i` draws from `ChaCha8Rng` seeded with `seed` on stream `i`, so
    /// the output depends only on `seed` and the plan, never on scheduling.
    /// Records come back in plan order.
    pub fn run_parallel(&self, seed: u64) -> Result<Vec<SearchRecord>, SearchError> {
        let fields = self
            .orders
            .iter()
            .map(|&q| -> Result<_, SearchError> { Ok((q, Arc::new(GaloisField::new(q)?))) })
            .collect::<Result<HashMap<_, _>, _>>()?;

        self.tasks
            .par_iter()
            .enumerate()
            .map(|(index, task)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(index as u64);
                self.run_task(*task, Arc::clone(&fields[&task.order]), &mut rng)
            })
            .collect()
    }

    fn run_task<R: Rng + ?Sized>(
        &self,
        task: Task,
        field: Arc<GaloisField>,
        rng: &mut R,
    ) -> Result<SearchRecord, SearchError> {
        let search = PointlessSearch::new(field.as_ref(), self.config.exponent);
        let outcome = search.search(
            rng,
            task.degree as usize,
            self.config.genus,
            self.config.max_trials,
        )?;

        info!(
            n = self.config.exponent,
            d = task.degree,
            q = task.order,
            found = outcome.is_found(),
            "task finished"
        );

        Ok(SearchRecord {
            degree: task.degree,
            order: task.order,
            field,
            outcome,
        })
    }
}

/// Sequential iterator over a [`Search`] plan. See [`Search::iter`].
pub struct SearchIter<'a, R: Rng + ?Sized> {
    search: &'a Search,
    rng: &'a mut R,
    next: usize,
    fields: HashMap<u64, Arc<GaloisField>>,
}

impl<R: Rng + ?Sized> Iterator for SearchIter<'_, R> {
    type Item = Result<SearchRecord, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        let task = *self.search.tasks.get(self.next)?;
        self.next += 1;

        let field = match self.fields.get(&task.order) {
            Some(field) => Arc::clone(field),
            None => match GaloisField::new(task.order) {
                Ok(field) => {
                    let field = Arc::new(field);
                    self.fields.insert(task.order, Arc::clone(&field));
                    field
                }
                Err(e) => return Some(Err(e.into())),
            },
        };

        Some(self.search.run_task(task, field, self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.search.tasks.len() - self.next;
        (left, Some(left))
    }
}
