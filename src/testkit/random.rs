//! Deterministic random sources.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::adapter::outbound::runtime::SeededRandom;
use crate::port::RandomSource;

/// Always returns the same draw.
pub struct FixedRandom(f64);

impl FixedRandom {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Lowest possible draw; every probability gate fires.
    pub fn min() -> Self {
        Self(0.0)
    }

    /// Highest possible draw; no probability gate fires.
    pub fn max() -> Self {
        Self(1.0 - f64::EPSILON)
    }
}

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.0
    }
}

/// Returns pre-loaded draws in order and panics once they run out.
///
/// Pins down exactly how many draws a code path takes.
pub struct ScriptedRandom {
    draws: Mutex<VecDeque<f64>>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.lock().len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&self) -> f64 {
        self.draws
            .lock()
            .pop_front()
            .expect("ScriptedRandom ran out of draws")
    }
}

/// Reproducible pseudo-random draws for tests that need many varied values.
pub fn seeded(seed: u64) -> SeededRandom {
    SeededRandom::with_seed(seed)
}
