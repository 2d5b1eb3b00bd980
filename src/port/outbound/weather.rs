//! Weather provider and airport directory ports.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::AirportCode;
use crate::error::ProviderError;

/// Precipitation kinds as reported by a provider: a single value or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PrecipitationField {
    Single(String),
    List(Vec<String>),
}

/// One hourly entry as returned by the provider, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderHour {
    /// Local clock time, usually `HH:MM:SS`.
    pub datetime: Option<String>,
    /// Seconds since the Unix epoch.
    pub datetime_epoch: Option<i64>,
    pub temp: Option<f64>,
    pub precipprob: Option<f64>,
    pub preciptype: Option<PrecipitationField>,
    pub windspeed: Option<f64>,
}

/// External hourly forecast source.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Hourly entries for a single day at a location.
    ///
    /// An empty vector means the provider had no hourly data for the day.
    async fn fetch_day(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<Vec<ProviderHour>, ProviderError>;

    /// Return the provider name for logging.
    fn provider_name(&self) -> &'static str;
}

/// Maps airport codes to the location strings the provider understands.
pub trait AirportDirectory: Send + Sync {
    /// Provider location for an airport, e.g. `New York,NY` for `JFK`.
    fn location_of(&self, code: &AirportCode) -> Option<String>;

    /// Every airport the directory knows, in a stable order.
    fn codes(&self) -> Vec<AirportCode>;
}
