//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the provider key (`VISUAL_CROSSING_KEY`) and the forecast cache TTL
//! (`WEATHER_TTL_SECONDS`). Every field has a default, so an empty file is valid.
//!
//! # Example
//!
//! ```no_run
//! use flightboard::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::airport::{default_airports, AirportConfig};
use super::logging::LoggingConfig;
use crate::adapter::outbound::visual_crossing::WeatherConfig;
use crate::application::scheduler::config::SchedulerConfig;
use crate::application::status::config::StatusConfig;
use crate::error::{ConfigError, Result};

/// Environment variable holding the Visual Crossing API key.
pub const API_KEY_ENV: &str = "VISUAL_CROSSING_KEY";
/// Environment variable overriding `weather.cache_ttl_seconds`.
pub const WEATHER_TTL_ENV: &str = "WEATHER_TTL_SECONDS";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "flightboard.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Tick period and per-tick concurrency.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Weather provider and forecast cache settings.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Status transition windows and probabilities.
    #[serde(default)]
    pub status: StatusConfig,

    /// Airports served by the board, in display order.
    #[serde(default = "default_airports")]
    pub airports: Vec<AirportConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            scheduler: SchedulerConfig::default(),
            weather: WeatherConfig::default(),
            status: StatusConfig::default(),
            airports: default_airports(),
        }
    }
}

fn default_database_path() -> String {
    "flightboard.db".to_string()
}

impl Config {
    /// Parse configuration from TOML content, applying process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - An environment override is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content, reading overrides through `env`.
    ///
    /// # Errors
    ///
    /// See [`Config::parse_toml`].
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[allow(clippy::result_large_err)]
    fn apply_env_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // API key is read from the environment when present, never logged.
        if let Some(key) = env(API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
            self.weather.api_key = Some(key.trim().to_string());
        }

        if let Some(raw) = env(WEATHER_TTL_ENV) {
            self.weather.cache_ttl_seconds =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        field: WEATHER_TTL_ENV,
                        reason: e.to_string(),
                    })?;
        }

        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }

        if self.scheduler.interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scheduler.interval_seconds",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.scheduler.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scheduler.max_concurrency",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.weather.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "weather.base_url",
            }
            .into());
        }
        if self.weather.cache_ttl_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "weather.cache_ttl_seconds",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.weather.http.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "weather.http.retry_max_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let status = &self.status;
        if !(0 < status.boarded_window_minutes
            && status.boarded_window_minutes <= status.boarding_window_minutes
            && status.boarding_window_minutes <= status.delay_window_minutes)
        {
            return Err(ConfigError::InvalidValue {
                field: "status",
                reason: "windows must be ordered 0 < boarded <= boarding <= delay".to_string(),
            }
            .into());
        }
        for (field, p) in [
            ("status.cancel_probability", status.cancel_probability),
            ("status.delay_probability", status.delay_probability),
            ("status.recovery_probability", status.recovery_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be between 0 and 1".to_string(),
                }
                .into());
            }
        }

        if self.airports.is_empty() {
            return Err(ConfigError::MissingField { field: "airports" }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml_with_env("", no_env).unwrap();

        assert_eq!(config.database, "flightboard.db");
        assert_eq!(config.scheduler.interval_seconds, 60);
        assert_eq!(config.weather.cache_ttl_seconds, 3600);
        assert_eq!(config.status.delay_window_minutes, 90);
        assert_eq!(config.airports.len(), 2);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn env_overrides_key_and_ttl() {
        let env = |key: &str| match key {
            API_KEY_ENV => Some("abc123".to_string()),
            WEATHER_TTL_ENV => Some("120".to_string()),
            _ => None,
        };
        let toml = r#"
            [weather]
            api_key = "from-file"
            cache_ttl_seconds = 900
        "#;

        let config = Config::parse_toml_with_env(toml, env).unwrap();

        assert_eq!(config.weather.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.weather.cache_ttl_seconds, 120);
    }

    #[test]
    fn blank_env_key_keeps_file_value() {
        let env = |key: &str| (key == API_KEY_ENV).then(|| "  ".to_string());

        let config =
            Config::parse_toml_with_env("[weather]\napi_key = \"file\"\n", env).unwrap();

        assert_eq!(config.weather.api_key.as_deref(), Some("file"));
    }

    #[test]
    fn malformed_ttl_override_is_rejected() {
        let env = |key: &str| (key == WEATHER_TTL_ENV).then(|| "soon".to_string());

        let result = Config::parse_toml_with_env("", env);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: WEATHER_TTL_ENV, .. }))
        ));
    }

    #[test]
    fn unordered_windows_are_rejected() {
        let toml = "[status]\nboarded_window_minutes = 50\nboarding_window_minutes = 45\n";

        let result = Config::parse_toml_with_env(toml, no_env);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "status", .. }))
        ));
    }

    #[test]
    fn probability_out_of_range_is_rejected() {
        let result = Config::parse_toml_with_env("[status]\ndelay_probability = 1.5\n", no_env);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "status.delay_probability",
                ..
            }))
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = Config::parse_toml_with_env("[scheduler]\ninterval_seconds = 0\n", no_env);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = Config::parse_toml_with_env("[logging]\nformat = \"xml\"\n", no_env);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::parse_toml_with_env("database = [", no_env);
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn explicit_airports_replace_defaults() {
        let toml = r#"
            [[airports]]
            code = "sfo"
            name = "San Francisco International"
            weather_location = "San Francisco,CA"
        "#;

        let config = Config::parse_toml_with_env(toml, no_env).unwrap();

        assert_eq!(config.airports.len(), 1);
        assert_eq!(config.airports[0].code, "sfo");
    }

    #[test]
    fn empty_airport_list_is_rejected() {
        let result = Config::parse_toml_with_env("airports = []\n", no_env);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "airports" }))
        ));
    }
}
