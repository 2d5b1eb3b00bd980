//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by parsing and `try_new` constructors.
//!
//! # Examples
//!
//! ```
//! use flightboard::domain::error::DomainError;
//! use flightboard::domain::AirportCode;
//!
//! let result = AirportCode::parse("J");
//! assert!(matches!(result, Err(DomainError::InvalidAirportCode { .. })));
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Airport codes are 3–4 uppercase ASCII alphanumerics.
    #[error("invalid airport code '{code}'")]
    InvalidAirportCode {
        /// The rejected input.
        code: String,
    },

    /// The status label is not one of the known flight statuses.
    #[error("unknown flight status '{label}'")]
    UnknownStatus {
        /// The rejected label.
        label: String,
    },

    /// The weekday label is not a full English weekday name.
    #[error("unknown day of week '{label}'")]
    UnknownDayOfWeek {
        /// The rejected label.
        label: String,
    },

    /// The time-of-day label is not `morning`, `afternoon` or `evening`.
    #[error("unknown time of day '{label}'")]
    UnknownTimeOfDay {
        /// The rejected label.
        label: String,
    },

    /// A flight must arrive strictly after it departs.
    #[error("arrival {arrival} is not after departure {departure}")]
    ArrivalNotAfterDeparture {
        /// Scheduled departure.
        departure: DateTime<Utc>,
        /// Scheduled arrival.
        arrival: DateTime<Utc>,
    },

    /// Forecast hours are 0–23.
    #[error("hour {hour} is outside 0-23")]
    InvalidHour {
        /// The rejected hour.
        hour: u32,
    },
}
