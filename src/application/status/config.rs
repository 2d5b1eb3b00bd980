//! Status engine configuration.

use serde::Deserialize;

/// Time windows and probabilities driving status transitions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusConfig {
    /// Minutes before departure at which boarding closes (`Boarded`).
    #[serde(default = "default_boarded_window")]
    pub boarded_window_minutes: i64,
    /// Minutes before departure at which boarding opens.
    #[serde(default = "default_boarding_window")]
    pub boarding_window_minutes: i64,
    /// Minutes before departure inside which an on-time flight may be delayed.
    #[serde(default = "default_delay_window")]
    pub delay_window_minutes: i64,
    /// Chance per evaluation that an on-time flight outside boarding is cancelled.
    #[serde(default = "default_cancel_probability")]
    pub cancel_probability: f64,
    /// Chance per evaluation of a delay without a weather hazard.
    #[serde(default = "default_delay_probability")]
    pub delay_probability: f64,
    /// Chance per evaluation that a delayed flight recovers when weather is fine.
    #[serde(default = "default_recovery_probability")]
    pub recovery_probability: f64,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            boarded_window_minutes: default_boarded_window(),
            boarding_window_minutes: default_boarding_window(),
            delay_window_minutes: default_delay_window(),
            cancel_probability: default_cancel_probability(),
            delay_probability: default_delay_probability(),
            recovery_probability: default_recovery_probability(),
            seed: None,
        }
    }
}

const fn default_boarded_window() -> i64 {
    15
}

const fn default_boarding_window() -> i64 {
    45
}

const fn default_delay_window() -> i64 {
    90
}

const fn default_cancel_probability() -> f64 {
    0.10
}

const fn default_delay_probability() -> f64 {
    0.30
}

const fn default_recovery_probability() -> f64 {
    0.50
}
