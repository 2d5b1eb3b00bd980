//! Cache-first hourly forecast loader.
//!
//! ```text
//! load_forecast(airport, date)
//!        |
//!        +-- WeatherCacheStore::get ---- hit ----> HourlyForecast
//!        |
//!        +-- miss --> AirportDirectory::location_of
//!                          |
//!                          v
//!                  WeatherProvider::fetch_day --> normalize --> upsert --> HourlyForecast
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::normalize::to_forecast;
use super::lookup::ForecastLookup;
use crate::domain::calendar::local_date_hour;
use crate::domain::{AirportCode, HourlyForecast, WeatherCacheEntry, WeatherSample};
use crate::error::WeatherError;
use crate::port::{AirportDirectory, Clock, WeatherCacheStore, WeatherProvider};

/// Cache-first loader of per-airport, per-day hourly forecasts.
///
/// Concurrent misses for the same key may each call the provider and each
/// upsert; the provider is deterministic per key so results converge.
pub struct WeatherCache {
    store: Arc<dyn WeatherCacheStore>,
    provider: Arc<dyn WeatherProvider>,
    airports: Arc<dyn AirportDirectory>,
    clock: Arc<dyn Clock>,
}

impl WeatherCache {
    pub fn new(
        store: Arc<dyn WeatherCacheStore>,
        provider: Arc<dyn WeatherProvider>,
        airports: Arc<dyn AirportDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            provider,
            airports,
            clock,
        }
    }

    /// Hourly forecast for an airport and calendar date.
    ///
    /// # Errors
    /// - [`WeatherError::Store`] if the cache cannot be read.
    /// - [`WeatherError::Provider`] if the provider fails after its retries.
    /// - [`WeatherError::DataUnavailable`] if the provider has no hourly data.
    ///
    /// Neither provider failure writes to the cache.
    pub async fn load_forecast(
        &self,
        airport: &AirportCode,
        date: NaiveDate,
    ) -> Result<HourlyForecast, WeatherError> {
        let cached = self
            .store
            .get(airport, date)
            .await
            .map_err(|e| WeatherError::Store(Box::new(e)))?;
        if let Some(entry) = cached {
            debug!(airport = %airport, date = %date, "Weather cache hit");
            return Ok(entry.hours);
        }

        let location = self
            .airports
            .location_of(airport)
            .unwrap_or_else(|| airport.to_string());
        debug!(
            airport = %airport,
            date = %date,
            location = %location,
            provider = self.provider.provider_name(),
            "Weather cache miss, fetching forecast"
        );

        let entries = self
            .provider
            .fetch_day(&location, date)
            .await
            .map_err(|source| WeatherError::Provider {
                airport: airport.clone(),
                date,
                source,
            })?;

        let hours = to_forecast(&entries);
        if hours.is_empty() {
            return Err(WeatherError::DataUnavailable {
                airport: airport.clone(),
                date,
            });
        }

        let entry = WeatherCacheEntry {
            airport: airport.clone(),
            date,
            hours,
            fetched_at: self.clock.now(),
        };
        match self.store.upsert(&entry).await {
            Ok(()) => info!(
                airport = %airport,
                date = %date,
                hours = entry.hours.len(),
                "Cached hourly forecast"
            ),
            Err(e) => warn!(
                airport = %airport,
                date = %date,
                error = %e,
                "Failed to cache forecast, serving fresh data"
            ),
        }

        Ok(entry.hours)
    }
}

#[async_trait]
impl ForecastLookup for WeatherCache {
    async fn sample_at(
        &self,
        airport: &AirportCode,
        departure: DateTime<Utc>,
    ) -> Result<Option<WeatherSample>, WeatherError> {
        let (date, hour) = local_date_hour(departure);
        let forecast = self.load_forecast(airport, date).await?;
        Ok(forecast.get(hour).cloned())
    }
}
