//! Normalization of provider hourly entries into domain samples.

use std::collections::BTreeSet;

use chrono::{DateTime, Timelike};
use tracing::trace;

use crate::domain::{HourlyForecast, WeatherSample};
use crate::port::{PrecipitationField, ProviderHour};

/// Hour-of-day key for a provider entry.
///
/// The local `HH:MM:SS` clock string wins; otherwise the UTC hour of the epoch
/// timestamp is used. Returns `None` when neither yields an hour in 0–23.
#[must_use]
pub fn hour_key(entry: &ProviderHour) -> Option<u32> {
    let from_clock = entry
        .datetime
        .as_deref()
        .filter(|clock| clock.contains(':'))
        .and_then(|clock| clock.split(':').next())
        .and_then(|hour| hour.trim().parse::<u32>().ok());

    from_clock
        .or_else(|| {
            entry
                .datetime_epoch
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|instant| instant.hour())
        })
        .filter(|hour| *hour < 24)
}

/// Absent → empty set, scalar → one element, list → as-is.
#[must_use]
pub fn precip_types(field: Option<&PrecipitationField>) -> BTreeSet<String> {
    match field {
        None => BTreeSet::new(),
        Some(PrecipitationField::Single(kind)) => BTreeSet::from([kind.clone()]),
        Some(PrecipitationField::List(kinds)) => kinds.iter().cloned().collect(),
    }
}

#[must_use]
pub fn to_sample(entry: &ProviderHour) -> WeatherSample {
    WeatherSample {
        temperature: entry.temp,
        precip_probability: entry.precipprob.unwrap_or(0.0),
        precip_types: precip_types(entry.preciptype.as_ref()),
        wind_speed: entry.windspeed.unwrap_or(0.0),
    }
}

/// Build the hour map, dropping entries without a usable hour.
///
/// Later entries for the same hour replace earlier ones.
#[must_use]
pub fn to_forecast(entries: &[ProviderHour]) -> HourlyForecast {
    let mut forecast = HourlyForecast::new();
    for entry in entries {
        let Some(hour) = hour_key(entry) else {
            trace!(datetime = ?entry.datetime, "Dropping provider hour without usable key");
            continue;
        };
        if let Err(e) = forecast.insert(hour, to_sample(entry)) {
            trace!(hour, error = %e, "Dropping provider hour outside the day");
        }
    }
    forecast
}
