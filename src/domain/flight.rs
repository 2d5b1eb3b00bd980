//! Flights and their operational status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{AirportCode, FlightId};

/// Operational status of a flight.
///
/// Lifecycle: `OnTime → Boarding → Boarded → Departed` on the happy path,
/// `OnTime → Delayed → (LateDeparture | OnTime)` when delayed, and
/// `OnTime → Cancelled` while far from departure. `Departed` and `Cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Boarding,
    Boarded,
    Departed,
    Delayed,
    #[serde(rename = "Late Departure")]
    LateDeparture,
    Cancelled,
}

impl FlightStatus {
    pub const ALL: [Self; 7] = [
        Self::OnTime,
        Self::Boarding,
        Self::Boarded,
        Self::Departed,
        Self::Delayed,
        Self::LateDeparture,
        Self::Cancelled,
    ];

    pub const TERMINAL: [Self; 2] = [Self::Departed, Self::Cancelled];

    /// Display label, also the persisted form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::Boarding => "Boarding",
            Self::Boarded => "Boarded",
            Self::Departed => "Departed",
            Self::Delayed => "Delayed",
            Self::LateDeparture => "Late Departure",
            Self::Cancelled => "Cancelled",
        }
    }

    /// No transition is permitted out of a terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Departed | Self::Cancelled)
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatus {
                label: s.to_string(),
            })
    }
}

/// Day of the week a flight departs on (local time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownDayOfWeek {
                label: s.to_string(),
            })
    }
}

/// Coarse departure-time bucket used to filter the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Bucket for a local hour: before noon is morning, 12–17 afternoon,
    /// 18 onward evening.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Morning, Self::Afternoon, Self::Evening]
            .into_iter()
            .find(|tod| tod.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownTimeOfDay {
                label: s.to_string(),
            })
    }
}

/// Departure and arrival airports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub departure: AirportCode,
    pub arrival: AirportCode,
}

impl Route {
    #[must_use]
    pub const fn new(departure: AirportCode, arrival: AirportCode) -> Self {
        Self { departure, arrival }
    }
}

/// Scheduled block time, computed from departure and arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlightDuration {
    pub hours: i64,
    pub minutes: i64,
}

impl fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {:02}m", self.hours, self.minutes)
    }
}

/// A scheduled flight and its simulated status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub flight_number: String,
    pub route: Route,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Derived from the local departure time; never recomputed.
    pub day_of_week: DayOfWeek,
    /// Derived from the local departure hour; never recomputed.
    pub time_of_day: TimeOfDay,
    pub status: FlightStatus,
    pub last_status_update: DateTime<Utc>,
}

impl Flight {
    /// Create an `OnTime` flight, deriving its weekday and time-of-day bucket.
    ///
    /// # Errors
    /// Returns [`DomainError::ArrivalNotAfterDeparture`] if `arrival_time`
    /// is not strictly after `departure_time`.
    pub fn try_new(
        flight_number: impl Into<String>,
        route: Route,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if arrival_time <= departure_time {
            return Err(DomainError::ArrivalNotAfterDeparture {
                departure: departure_time,
                arrival: arrival_time,
            });
        }

        let local = departure_time.with_timezone(&Local);
        Ok(Self {
            id: FlightId::generate(),
            flight_number: flight_number.into(),
            route,
            departure_time,
            arrival_time,
            day_of_week: local.weekday().into(),
            time_of_day: TimeOfDay::from_hour(local.hour()),
            status: FlightStatus::OnTime,
            last_status_update: created_at,
        })
    }

    /// Whole minutes until departure, rounded toward negative infinity.
    #[must_use]
    pub fn minutes_to_departure(&self, now: DateTime<Utc>) -> i64 {
        (self.departure_time - now)
            .num_milliseconds()
            .div_euclid(60_000)
    }

    #[must_use]
    pub fn duration(&self) -> FlightDuration {
        let total = (self.arrival_time - self.departure_time).num_minutes();
        FlightDuration {
            hours: total.div_euclid(60),
            minutes: total.rem_euclid(60),
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn route() -> Route {
        Route::new(
            AirportCode::parse("JFK").unwrap(),
            AirportCode::parse("LAX").unwrap(),
        )
    }

    #[test]
    fn status_labels_roundtrip() {
        for status in FlightStatus::ALL {
            assert_eq!(status.as_str().parse::<FlightStatus>().unwrap(), status);
        }
        assert!("Landed".parse::<FlightStatus>().is_err());
    }

    #[test]
    fn only_departed_and_cancelled_are_terminal() {
        let terminal: Vec<_> = FlightStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, FlightStatus::TERMINAL.to_vec());
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_string(&FlightStatus::LateDeparture).unwrap();
        assert_eq!(json, "\"Late Departure\"");
    }

    #[test]
    fn time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(18), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Evening);
    }

    #[test]
    fn day_of_week_parses_case_insensitively() {
        assert_eq!("monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert!("Funday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn try_new_rejects_arrival_before_departure() {
        let departure = Utc.with_ymd_and_hms(2025, 6, 12, 14, 0, 0).unwrap();
        let result = Flight::try_new("AA1", route(), departure, departure, departure);
        assert!(matches!(
            result,
            Err(DomainError::ArrivalNotAfterDeparture { .. })
        ));
    }

    #[test]
    fn try_new_derives_local_buckets() {
        let departure = Utc.with_ymd_and_hms(2025, 6, 12, 14, 0, 0).unwrap();
        let flight = Flight::try_new(
            "AA1",
            route(),
            departure,
            departure + Duration::hours(6),
            departure,
        )
        .unwrap();

        let local = departure.with_timezone(&Local);
        assert_eq!(flight.day_of_week, DayOfWeek::from(local.weekday()));
        assert_eq!(flight.time_of_day, TimeOfDay::from_hour(local.hour()));
        assert_eq!(flight.status, FlightStatus::OnTime);
    }

    #[test]
    fn duration_is_computed_from_timestamps() {
        let departure = Utc.with_ymd_and_hms(2025, 6, 12, 14, 0, 0).unwrap();
        let flight = Flight::try_new(
            "AA1",
            route(),
            departure,
            departure + Duration::minutes(5 * 60 + 45),
            departure,
        )
        .unwrap();
        assert_eq!(
            flight.duration(),
            FlightDuration {
                hours: 5,
                minutes: 45
            }
        );
        assert_eq!(flight.duration().to_string(), "5h 45m");
    }

    #[test]
    fn minutes_to_departure_floors() {
        let departure = Utc.with_ymd_and_hms(2025, 6, 12, 14, 0, 0).unwrap();
        let flight = Flight::try_new(
            "AA1",
            route(),
            departure,
            departure + Duration::hours(1),
            departure,
        )
        .unwrap();

        assert_eq!(flight.minutes_to_departure(departure - Duration::seconds(90)), 1);
        assert_eq!(flight.minutes_to_departure(departure - Duration::seconds(30)), 0);
        assert_eq!(flight.minutes_to_departure(departure + Duration::seconds(30)), -1);
    }
}
