//! Per-tick progress increments
//!
//! The simulator asks an [`IncrementSource`] for one value per in-flight item
//! per tick. Randomized sources draw from `[floor, MAX_INCREMENT]`; the floor
//! keeps completion bounded at `ceil(100 / floor)` ticks.

use meshvault_core::TransferId;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::PROGRESS_COMPLETE;

/// Largest progress gain allowed in one tick
pub const MAX_INCREMENT: f64 = 15.0;
/// Default smallest progress gain for random sources
pub const DEFAULT_MIN_INCREMENT: f64 = 0.5;

/// Supplies the progress gain for one item on one tick
pub trait IncrementSource {
    fn next_increment(&mut self, id: TransferId) -> f64;
}

impl<F> IncrementSource for F
where
    F: FnMut(TransferId) -> f64,
{
    fn next_increment(&mut self, id: TransferId) -> f64 {
        self(id)
    }
}

/// Worst-case number of ticks to finish with a guaranteed minimum gain
pub fn max_ticks_to_complete(floor: f64) -> u64 {
    (PROGRESS_COMPLETE / floor).ceil() as u64
}

/// Uniform random gain in `[floor, MAX_INCREMENT]`
#[derive(Debug, Clone)]
pub struct RandomIncrement {
    rng: StdRng,
    floor: f64,
    dist: Uniform<f64>,
}

impl RandomIncrement {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy(), DEFAULT_MIN_INCREMENT)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), DEFAULT_MIN_INCREMENT)
    }

    /// Replace the floor. Values that are not strictly positive fall back to
    /// the default; values above MAX_INCREMENT are capped.
    pub fn with_floor(self, floor: f64) -> Self {
        Self::from_rng(self.rng, floor)
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    fn from_rng(rng: StdRng, floor: f64) -> Self {
        let floor = if floor.is_finite() && floor > 0.0 {
            floor.min(MAX_INCREMENT)
        } else {
            warn!(floor, fallback = DEFAULT_MIN_INCREMENT, "non-positive increment floor replaced");
            DEFAULT_MIN_INCREMENT
        };

        Self {
            rng,
            floor,
            dist: Uniform::new_inclusive(floor, MAX_INCREMENT),
        }
    }
}

impl Default for RandomIncrement {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementSource for RandomIncrement {
    fn next_increment(&mut self, _id: TransferId) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}

/// The same gain every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedIncrement(pub f64);

impl IncrementSource for FixedIncrement {
    fn next_increment(&mut self, _id: TransferId) -> f64 {
        self.0
    }
}
