//! Production clock and random source.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::port::{Clock, RandomSource};

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// `StdRng` behind a mutex, seeded from entropy or a fixed seed.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    #[must_use]
    pub fn from_config(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::with_seed)
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }

    fn int_in(&self, lo: i64, hi: i64) -> i64 {
        self.rng.lock().gen_range(lo..=hi)
    }
}
