//! Airport list configuration.

use serde::Deserialize;

use crate::adapter::outbound::airport::{AirportEntry, StaticAirportDirectory};
use crate::domain::AirportCode;
use crate::error::{ConfigError, Result};

/// One `[[airports]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AirportConfig {
    /// IATA code, e.g. `JFK`.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Location string sent to the weather provider, e.g. `New York,NY`.
    pub weather_location: String,
}

impl AirportConfig {
    fn entry(&self) -> Result<AirportEntry> {
        let code = AirportCode::parse(&self.code).map_err(|e| ConfigError::InvalidValue {
            field: "airports.code",
            reason: e.to_string(),
        })?;
        if self.weather_location.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "airports.weather_location",
                reason: format!("empty location for {code}"),
            }
            .into());
        }
        Ok(AirportEntry {
            code,
            location: self.weather_location.clone(),
        })
    }
}

pub(crate) fn default_airports() -> Vec<AirportConfig> {
    vec![
        AirportConfig {
            code: "JFK".into(),
            name: "John F. Kennedy International".into(),
            weather_location: "New York,NY".into(),
        },
        AirportConfig {
            code: "LAX".into(),
            name: "Los Angeles International".into(),
            weather_location: "Los Angeles,CA".into(),
        },
    ]
}

/// Build the airport directory from configured entries.
///
/// # Errors
/// Returns [`ConfigError::InvalidValue`] for a malformed code, an empty
/// location or a duplicate code.
pub fn build_directory(airports: &[AirportConfig]) -> Result<StaticAirportDirectory> {
    let mut entries: Vec<AirportEntry> = Vec::with_capacity(airports.len());
    for airport in airports {
        let entry = airport.entry()?;
        if entries.iter().any(|existing| existing.code == entry.code) {
            return Err(ConfigError::InvalidValue {
                field: "airports.code",
                reason: format!("duplicate airport {}", entry.code),
            }
            .into());
        }
        entries.push(entry);
    }
    Ok(StaticAirportDirectory::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::port::AirportDirectory;

    #[test]
    fn defaults_resolve_locations() {
        let directory = build_directory(&default_airports()).unwrap();

        let jfk = AirportCode::parse("JFK").unwrap();
        assert_eq!(directory.location_of(&jfk).as_deref(), Some("New York,NY"));
        assert_eq!(directory.codes().len(), 2);
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let mut airports = default_airports();
        airports.push(airports[0].clone());

        let result = build_directory(&airports);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "airports.code", .. }))
        ));
    }

    #[test]
    fn blank_location_is_rejected() {
        let airports = vec![AirportConfig {
            code: "SFO".into(),
            name: String::new(),
            weather_location: "  ".into(),
        }];

        assert!(build_directory(&airports).is_err());
    }
}
