//! Logging configuration and initialization.

use std::io;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over `level`. Events go to stderr so
    /// `--json` output on stdout stays machine-readable. Calling this twice
    /// in one process is a no-op.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}
