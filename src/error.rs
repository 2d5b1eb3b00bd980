use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::AirportCode;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by the external weather provider after its retry policy.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("weather provider API key is not configured")]
    MissingApiKey,

    #[error("invalid provider URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("weather provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode weather provider response: {0}")]
    Decode(String),
}

/// Errors surfaced by the weather cache loader.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The provider answered but had no usable hourly data for the day.
    #[error("no hourly weather data for {airport} on {date}")]
    DataUnavailable { airport: AirportCode, date: NaiveDate },

    /// The provider could not be reached or failed after retries.
    #[error("weather provider failed for {airport} on {date}: {source}")]
    Provider {
        airport: AirportCode,
        date: NaiveDate,
        #[source]
        source: ProviderError,
    },

    /// The cache store could not be read.
    #[error("weather cache store failed: {0}")]
    Store(#[source] Box<Error>),
}

impl WeatherError {
    /// True when the forecast could not be obtained from the provider.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. } | Self::Provider { .. })
    }
}

/// Persistence errors from the flight and weather stores.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("database query failed: {0}")]
    Query(String),

    #[error("flight {0} not found")]
    NotFound(String),

    #[error("corrupt row in {table}: {reason}")]
    Corrupt { table: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
