//! Forecast lookup seam between the status engine and the weather cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AirportCode, WeatherSample};
use crate::error::WeatherError;

/// Departure-hour forecast lookup consulted by the status engine.
#[async_trait]
pub trait ForecastLookup: Send + Sync {
    /// Sample for the hour of `departure` at `airport`, if the forecast has one.
    async fn sample_at(
        &self,
        airport: &AirportCode,
        departure: DateTime<Utc>,
    ) -> Result<Option<WeatherSample>, WeatherError>;
}
