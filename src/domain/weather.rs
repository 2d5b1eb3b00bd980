//! Hourly weather forecast types.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::AirportCode;

/// One hour of forecast for one airport.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Temperature in °F, when the provider reported one.
    pub temperature: Option<f64>,
    /// Chance of precipitation, 0–100.
    pub precip_probability: f64,
    /// Precipitation kinds such as `rain` or `snow`; empty when none.
    pub precip_types: BTreeSet<String>,
    /// Wind speed in mph.
    pub wind_speed: f64,
}

/// Forecast for one airport and day, keyed by local hour 0–23.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyForecast(BTreeMap<u8, WeatherSample>);

impl HourlyForecast {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the sample for an hour, replacing any previous one.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidHour`] for hours above 23.
    pub fn insert(&mut self, hour: u32, sample: WeatherSample) -> Result<(), DomainError> {
        let slot = u8::try_from(hour)
            .ok()
            .filter(|h| *h < 24)
            .ok_or(DomainError::InvalidHour { hour })?;
        self.0.insert(slot, sample);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, hour: u32) -> Option<&WeatherSample> {
        u8::try_from(hour).ok().and_then(|h| self.0.get(&h))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &WeatherSample)> {
        self.0.iter().map(|(hour, sample)| (*hour, sample))
    }
}

/// Cached forecast for one (airport, date) key.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCacheEntry {
    pub airport: AirportCode,
    pub date: NaiveDate,
    pub hours: HourlyForecast,
    pub fetched_at: DateTime<Utc>,
}
