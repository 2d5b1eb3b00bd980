//! Static airport directory.

use crate::domain::AirportCode;
use crate::port::AirportDirectory;

/// Airport with its provider location string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportEntry {
    pub code: AirportCode,
    pub location: String,
}

/// Fixed list of airports, in configuration order.
#[derive(Debug, Clone)]
pub struct StaticAirportDirectory {
    entries: Vec<AirportEntry>,
}

impl StaticAirportDirectory {
    #[must_use]
    pub fn new(entries: Vec<AirportEntry>) -> Self {
        Self { entries }
    }
}

impl Default for StaticAirportDirectory {
    /// JFK and LAX.
    fn default() -> Self {
        let entry = |code: &str, location: &str| {
            AirportCode::parse(code).ok().map(|code| AirportEntry {
                code,
                location: location.to_string(),
            })
        };
        Self::new(
            [entry("JFK", "New York,NY"), entry("LAX", "Los Angeles,CA")]
                .into_iter()
                .flatten()
                .collect(),
        )
    }
}

impl AirportDirectory for StaticAirportDirectory {
    fn location_of(&self, code: &AirportCode) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| &entry.code == code)
            .map(|entry| entry.location.clone())
    }

    fn codes(&self) -> Vec<AirportCode> {
        self.entries.iter().map(|entry| entry.code.clone()).collect()
    }
}
