//! SQLite persistence adapters.
//!
//! Flight and weather cache stores backed by SQLite through Diesel. Instants
//! are stored as fixed-format RFC 3339 UTC text so string comparison in SQL
//! matches time order.

pub mod database;
pub mod flight_store;
pub mod weather_store;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::PersistenceError;

pub use flight_store::SqliteFlightStore;
pub use weather_store::SqliteWeatherStore;

/// Canonical stored form of an instant, e.g. `2025-06-12T09:00:00.000Z`.
pub(crate) fn timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(
    table: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| PersistenceError::Corrupt {
            table,
            reason: format!("bad timestamp {value:?}: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_sort_lexically() {
        let early = Utc.with_ymd_and_hms(2025, 6, 12, 9, 0, 0).unwrap();
        let late = early + chrono::Duration::milliseconds(1);

        assert_eq!(timestamp(early), "2025-06-12T09:00:00.000Z");
        assert!(timestamp(early) < timestamp(late));
        assert_eq!(parse_timestamp("flights", &timestamp(late)).unwrap(), late);
    }

    #[test]
    fn bad_timestamp_is_corrupt() {
        assert!(matches!(
            parse_timestamp("flights", "yesterday"),
            Err(PersistenceError::Corrupt { table: "flights", .. })
        ));
    }
}
