//! Handlers for the `board` and `forecast` commands.

use chrono::Local;
use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::{BoardArgs, ForecastArgs};
use crate::adapter::inbound::cli::output;
use crate::application::board::{BoardEntry, BoardQuery};
use crate::domain::{needs_alert, WeatherSample};
use crate::application::services::Services;
use crate::error::Result;

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "Flight")]
    flight: String,
    #[tabled(rename = "To")]
    arrival: String,
    #[tabled(rename = "Departs")]
    departs: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Weather")]
    weather: String,
}

impl From<&BoardEntry> for BoardRow {
    fn from(entry: &BoardEntry) -> Self {
        let flight = &entry.flight;
        let weather = match &entry.weather {
            Some(sample) if entry.weather_alert => format!("{} (alert)", summarize(sample)),
            Some(sample) => summarize(sample),
            None => "-".to_string(),
        };
        Self {
            flight: flight.flight_number.clone(),
            arrival: flight.route.arrival.to_string(),
            departs: flight
                .departure_time
                .with_timezone(&Local)
                .format("%a %H:%M")
                .to_string(),
            duration: entry.duration.to_string(),
            status: flight.status.to_string(),
            weather,
        }
    }
}

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "Hour")]
    hour: String,
    #[tabled(rename = "Temp")]
    temperature: String,
    #[tabled(rename = "Precip")]
    precipitation: String,
    #[tabled(rename = "Wind")]
    wind: String,
    #[tabled(rename = "Alert")]
    alert: &'static str,
}

fn summarize(sample: &WeatherSample) -> String {
    let temperature = sample
        .temperature
        .map_or_else(|| "?".to_string(), |t| format!("{t:.0}°F"));
    format!(
        "{temperature}, {:.0}% precip, {:.0} mph",
        sample.precip_probability, sample.wind_speed
    )
}

fn precipitation(sample: &WeatherSample) -> String {
    if sample.precip_types.is_empty() {
        return format!("{:.0}%", sample.precip_probability);
    }
    let kinds: Vec<&str> = sample.precip_types.iter().map(String::as_str).collect();
    format!("{:.0}% {}", sample.precip_probability, kinds.join("/"))
}

/// Print the departure board for one airport, weekday and bucket.
pub async fn board(services: &Services, args: &BoardArgs) -> Result<()> {
    let query = BoardQuery {
        airport: args.airport.clone(),
        day_of_week: args.day,
        time_of_day: args.time_of_day,
    };
    let entries = services.board().query(&query).await?;

    if output::is_json() {
        output::json_output(&json!({
            "airport": query.airport,
            "day_of_week": query.day_of_week,
            "time_of_day": query.time_of_day,
            "flights": entries,
        }));
        return Ok(());
    }

    output::section(&format!(
        "Departures from {} on {} {}",
        query.airport, query.day_of_week, query.time_of_day
    ));
    if entries.is_empty() {
        output::warning("No flights match");
        return Ok(());
    }
    output::table(entries.iter().map(BoardRow::from));
    Ok(())
}

/// Print the hourly forecast for one airport and date.
pub async fn forecast(services: &Services, args: &ForecastArgs) -> Result<()> {
    let hours = services.weather.load_forecast(&args.airport, args.date).await?;

    if output::is_json() {
        output::json_output(&json!({
            "airport": args.airport,
            "date": args.date,
            "hours": hours,
        }));
        return Ok(());
    }

    output::section(&format!("Forecast for {} on {}", args.airport, args.date));
    output::table(hours.iter().map(|(hour, sample)| ForecastRow {
        hour: format!("{hour:02}:00"),
        temperature: sample
            .temperature
            .map_or_else(|| "-".to_string(), |t| format!("{t:.0}°F")),
        precipitation: precipitation(sample),
        wind: format!("{:.0} mph", sample.wind_speed),
        alert: if needs_alert(Some(sample)) { "yes" } else { "" },
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightStatus;
    use crate::testkit::domain::{flight_departing_in, local_noon_today};
    use std::collections::BTreeSet;

    fn sample(wind: f64) -> WeatherSample {
        WeatherSample {
            temperature: Some(68.4),
            precip_probability: 80.0,
            precip_types: BTreeSet::from(["rain".to_string(), "snow".to_string()]),
            wind_speed: wind,
        }
    }

    #[test]
    fn summary_rounds_values() {
        assert_eq!(summarize(&sample(12.6)), "68°F, 80% precip, 13 mph");
    }

    #[test]
    fn precipitation_lists_kinds() {
        assert_eq!(precipitation(&sample(0.0)), "80% rain/snow");
        assert_eq!(precipitation(&WeatherSample::default()), "0%");
    }

    #[test]
    fn board_row_marks_alerts_and_missing_weather() {
        let flight = flight_departing_in(local_noon_today(), 60, FlightStatus::Delayed);
        let mut entry = BoardEntry {
            duration: flight.duration(),
            weather: Some(sample(30.0)),
            weather_alert: true,
            flight,
        };

        let row = BoardRow::from(&entry);
        assert!(row.weather.ends_with("(alert)"));
        assert_eq!(row.status, "Delayed");
        assert_eq!(row.duration, "6h 00m");

        entry.weather = None;
        entry.weather_alert = false;
        assert_eq!(BoardRow::from(&entry).weather, "-");
    }
}
