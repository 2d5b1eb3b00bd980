//! Departure board queries enriched with weather.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::weather::cache::WeatherCache;
use crate::domain::calendar::local_date_hour;
use crate::domain::{
    needs_alert, AirportCode, DayOfWeek, Flight, FlightDuration, HourlyForecast, TimeOfDay,
    WeatherSample,
};
use crate::error::Result;
use crate::port::{FlightFilter, FlightQuery, FlightStore};

/// Board selection: one airport, weekday and time-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardQuery {
    pub airport: AirportCode,
    pub day_of_week: DayOfWeek,
    pub time_of_day: TimeOfDay,
}

/// One departure board row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardEntry {
    #[serde(flatten)]
    pub flight: Flight,
    pub duration: FlightDuration,
    /// Departure-hour sample, absent when the forecast could not be loaded.
    pub weather: Option<WeatherSample>,
    pub weather_alert: bool,
}

/// Read side over flights and cached weather.
pub struct FlightBoard {
    store: Arc<dyn FlightStore>,
    weather: Arc<WeatherCache>,
}

impl FlightBoard {
    pub fn new(store: Arc<dyn FlightStore>, weather: Arc<WeatherCache>) -> Self {
        Self { store, weather }
    }

    /// Flights matching `query`, ordered by departure.
    ///
    /// The forecast is loaded once per local departure date. Weather
    /// failures are logged and leave the affected rows without weather.
    ///
    /// # Errors
    /// Returns an error only if the flight store query fails.
    pub async fn query(&self, query: &BoardQuery) -> Result<Vec<BoardEntry>> {
        let filter = FlightFilter::all()
            .at_airport(query.airport.clone())
            .on_day(query.day_of_week)
            .at_time_of_day(query.time_of_day);
        let flights = self.store.find(&FlightQuery::new(filter)).await?;
        debug!(
            airport = %query.airport,
            day = %query.day_of_week,
            time_of_day = %query.time_of_day,
            flights = flights.len(),
            "Board query"
        );

        let mut forecasts: HashMap<NaiveDate, Option<HourlyForecast>> = HashMap::new();
        let mut entries = Vec::with_capacity(flights.len());

        for flight in flights {
            let (date, hour) = local_date_hour(flight.departure_time);
            if !forecasts.contains_key(&date) {
                let forecast = self.forecast(&flight.route.departure, date).await;
                forecasts.insert(date, forecast);
            }

            let weather = forecasts
                .get(&date)
                .and_then(Option::as_ref)
                .and_then(|forecast| forecast.get(hour))
                .cloned();
            entries.push(BoardEntry {
                duration: flight.duration(),
                weather_alert: needs_alert(weather.as_ref()),
                weather,
                flight,
            });
        }

        Ok(entries)
    }

    async fn forecast(&self, airport: &AirportCode, date: NaiveDate) -> Option<HourlyForecast> {
        match self.weather.load_forecast(airport, date).await {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                warn!(airport = %airport, date = %date, error = %e, "Board weather unavailable");
                None
            }
        }
    }
}
