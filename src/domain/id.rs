//! Domain identifier types with proper encapsulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

/// Flight row identifier - newtype for type safety.
///
/// Distinct from the public flight number: two rows on different days can
/// share a flight number but never an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlightId(String);

impl FlightId {
    /// Create a new `FlightId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the flight ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FlightId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for FlightId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// IATA/ICAO airport code such as `JFK`.
///
/// The inner String is private; construction goes through [`AirportCode::parse`]
/// so every value is trimmed, uppercased and validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Parse and normalize an airport code.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidAirportCode`] unless the trimmed input is
    /// 3 or 4 ASCII alphanumeric characters.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let normalized = code.trim().to_ascii_uppercase();
        let valid = (3..=4).contains(&normalized.len())
            && normalized.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid {
            return Err(DomainError::InvalidAirportCode {
                code: code.to_string(),
            });
        }
        Ok(Self(normalized))
    }

    /// Get the airport code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AirportCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}
