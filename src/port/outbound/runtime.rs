//! Clock and randomness ports.
//!
//! Both are injected so status decisions are reproducible under test.

use chrono::{DateTime, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of uniform draws: floats in `[0, 1)` and bounded integers.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;

    /// Draw once and report whether the draw fell below `probability`.
    fn chance(&self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform integer in `lo..=hi`. Requires `lo <= hi`.
    fn int_in(&self, lo: i64, hi: i64) -> i64 {
        let span = (hi - lo + 1) as f64;
        let offset = (self.next_f64() * span) as i64;
        lo + offset.min(hi - lo)
    }
}
