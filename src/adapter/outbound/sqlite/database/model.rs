//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{flights, weather_cache};

/// Database row for a flight.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = flights)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FlightRow {
    pub id: String,
    pub flight_number: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub day_of_week: String,
    pub time_of_day: String,
    pub status: String,
    pub last_status_update: String,
}

/// Database row for a cached forecast.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = weather_cache)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WeatherCacheRow {
    pub airport_code: String,
    pub forecast_date: String,
    pub hours_json: String,
    pub fetched_at: String,
}
