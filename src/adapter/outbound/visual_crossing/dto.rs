//! Timeline API response types.
//!
//! Only the fields the forecast cache uses are decoded; everything else in
//! the payload is ignored.

use serde::Deserialize;

use crate::port::{PrecipitationField, ProviderHour};

/// Top-level timeline response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    #[serde(default)]
    pub resolved_address: Option<String>,
    #[serde(default)]
    pub days: Vec<TimelineDay>,
}

/// One day of the timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineDay {
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub hours: Vec<TimelineHour>,
}

/// One hour of a timeline day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineHour {
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub datetime_epoch: Option<i64>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub precipprob: Option<f64>,
    #[serde(default)]
    pub preciptype: Option<PrecipitationField>,
    #[serde(default)]
    pub windspeed: Option<f64>,
}

impl TimelineResponse {
    /// Hours of the first (and only requested) day; empty if there is none.
    #[must_use]
    pub fn into_hours(self) -> Vec<ProviderHour> {
        self.days
            .into_iter()
            .next()
            .map(|day| day.hours.into_iter().map(ProviderHour::from).collect())
            .unwrap_or_default()
    }
}

impl From<TimelineHour> for ProviderHour {
    fn from(hour: TimelineHour) -> Self {
        Self {
            datetime: hour.datetime,
            datetime_epoch: hour.datetime_epoch,
            temp: hour.temp,
            precipprob: hour.precipprob,
            preciptype: hour.preciptype,
            windspeed: hour.windspeed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "resolvedAddress": "New York, NY, United States",
        "days": [{
            "datetime": "2025-06-12",
            "tempmax": 80.1,
            "hours": [
                {"datetime": "00:00:00", "datetimeEpoch": 1749700800, "temp": 68.2,
                 "precipprob": 0.0, "preciptype": null, "windspeed": 4.1},
                {"datetime": "14:00:00", "datetimeEpoch": 1749751200, "temp": 79.0,
                 "precipprob": 85.0, "preciptype": ["rain", "snow"], "windspeed": 12.3},
                {"datetime": "15:00:00", "datetimeEpoch": 1749754800,
                 "precipprob": 40.0, "preciptype": "rain", "windspeed": 22.0}
            ]
        }]
    }"#;

    #[test]
    fn decodes_hourly_entries() {
        let response: TimelineResponse = serde_json::from_str(PAYLOAD).unwrap();
        let hours = response.into_hours();

        assert_eq!(hours.len(), 3);
        assert_eq!(hours[0].datetime.as_deref(), Some("00:00:00"));
        assert_eq!(hours[0].datetime_epoch, Some(1_749_700_800));
        assert_eq!(hours[0].preciptype, None);
        assert_eq!(
            hours[1].preciptype,
            Some(PrecipitationField::List(vec!["rain".into(), "snow".into()]))
        );
        assert_eq!(
            hours[2].preciptype,
            Some(PrecipitationField::Single("rain".into()))
        );
        assert_eq!(hours[2].temp, None);
    }

    #[test]
    fn missing_days_yield_no_hours() {
        let response: TimelineResponse = serde_json::from_str(r#"{"days": []}"#).unwrap();
        assert!(response.into_hours().is_empty());

        let response: TimelineResponse =
            serde_json::from_str(r#"{"days": [{"datetime": "2025-06-12"}]}"#).unwrap();
        assert!(response.into_hours().is_empty());
    }
}
