//! Scheduler configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the periodic status scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between ticks.
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
    /// Maximum flights evaluated concurrently within one tick.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl SchedulerConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

const fn default_interval_seconds() -> u64 {
    60
}

const fn default_max_concurrency() -> usize {
    8
}
