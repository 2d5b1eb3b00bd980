//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Flight`], [`AirportCode`] and
//! provider hours so tests focus on assertions rather than construction
//! boilerplate.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveTime, Utc};

use crate::adapter::outbound::airport::StaticAirportDirectory;
use crate::domain::calendar::local_to_utc;
use crate::domain::{AirportCode, Flight, FlightStatus, Route};
use crate::port::{AirportDirectory, PrecipitationField, ProviderHour};

static NEXT_FLIGHT: AtomicU32 = AtomicU32::new(100);

/// Parse an [`AirportCode`], panicking on invalid input.
pub fn airport(code: &str) -> AirportCode {
    AirportCode::parse(code).unwrap()
}

/// Directory with JFK (`New York,NY`) and LAX (`Los Angeles,CA`).
pub fn airport_directory() -> Arc<dyn AirportDirectory> {
    Arc::new(StaticAirportDirectory::default())
}

/// Local 12:00 today, as UTC.
///
/// Leaves room on both sides for departures hours away that still fall in
/// the same local day.
pub fn local_noon_today() -> DateTime<Utc> {
    let today = Local::now().date_naive();
    local_to_utc(today.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()))
}

/// A JFK → LAX flight departing `minutes` after `now` with the given status.
///
/// `last_status_update` is one hour before `now` so updates are observable.
pub fn flight_departing_in(now: DateTime<Utc>, minutes: i64, status: FlightStatus) -> Flight {
    let departure = now + Duration::minutes(minutes);
    let number = NEXT_FLIGHT.fetch_add(1, Ordering::Relaxed);
    let mut flight = Flight::try_new(
        format!("TB{number}"),
        Route::new(airport("JFK"), airport("LAX")),
        departure,
        departure + Duration::hours(6),
        now - Duration::hours(1),
    )
    .unwrap();
    flight.status = status;
    flight
}

/// `n` calm hourly entries starting at 00:00 local.
pub fn provider_hours(n: u32) -> Vec<ProviderHour> {
    (0..n)
        .map(|hour| ProviderHour {
            datetime: Some(format!("{hour:02}:00:00")),
            temp: Some(60.0 + f64::from(hour)),
            precipprob: Some(10.0),
            preciptype: None,
            windspeed: Some(5.0),
            ..ProviderHour::default()
        })
        .collect()
}

/// 24 hourly entries that all need an alert: heavy rain and strong wind.
pub fn hazardous_hours() -> Vec<ProviderHour> {
    (0..24)
        .map(|hour| ProviderHour {
            datetime: Some(format!("{hour:02}:00:00")),
            temp: Some(48.0),
            precipprob: Some(90.0),
            preciptype: Some(PrecipitationField::Single("rain".to_string())),
            windspeed: Some(28.0),
            ..ProviderHour::default()
        })
        .collect()
}
