//! SQLite weather cache store implementation.
//!
//! One row per (airport, date). Rows older than the TTL are treated as absent
//! on read and can be swept with [`WeatherCacheStore::prune_expired`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use diesel::prelude::*;

use super::database::connection::{checkout, DbPool};
use super::database::model::WeatherCacheRow;
use super::database::schema::weather_cache;
use super::{parse_timestamp, timestamp};
use crate::domain::{AirportCode, HourlyForecast, WeatherCacheEntry};
use crate::error::{PersistenceError, Result};
use crate::port::{Clock, WeatherCacheStore};

const TABLE: &str = "weather_cache";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed weather cache store with lazy TTL expiry.
pub struct SqliteWeatherStore {
    pool: DbPool,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SqliteWeatherStore {
    pub fn new(pool: DbPool, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { pool, ttl, clock }
    }

    /// Rows fetched at or before this instant are expired.
    fn cutoff(&self) -> String {
        timestamp(self.clock.now() - self.ttl)
    }

    fn to_row(entry: &WeatherCacheEntry) -> Result<WeatherCacheRow> {
        Ok(WeatherCacheRow {
            airport_code: entry.airport.to_string(),
            forecast_date: entry.date.format(DATE_FORMAT).to_string(),
            hours_json: serde_json::to_string(&entry.hours)?,
            fetched_at: timestamp(entry.fetched_at),
        })
    }

    fn from_row(row: WeatherCacheRow) -> Result<WeatherCacheEntry> {
        let corrupt = |reason: String| PersistenceError::Corrupt {
            table: TABLE,
            reason: format!("{}/{}: {reason}", row.airport_code, row.forecast_date),
        };
        let airport = AirportCode::parse(&row.airport_code).map_err(|e| corrupt(e.to_string()))?;
        let date = NaiveDate::parse_from_str(&row.forecast_date, DATE_FORMAT)
            .map_err(|e| corrupt(e.to_string()))?;
        let hours: HourlyForecast =
            serde_json::from_str(&row.hours_json).map_err(|e| corrupt(e.to_string()))?;

        Ok(WeatherCacheEntry {
            airport,
            date,
            hours,
            fetched_at: parse_timestamp(TABLE, &row.fetched_at)?,
        })
    }
}

#[async_trait]
impl WeatherCacheStore for SqliteWeatherStore {
    async fn get(&self, airport: &AirportCode, date: NaiveDate) -> Result<Option<WeatherCacheEntry>> {
        let mut conn = checkout(&self.pool)?;

        let row: Option<WeatherCacheRow> = weather_cache::table
            .find((airport.as_str(), date.format(DATE_FORMAT).to_string()))
            .filter(weather_cache::fetched_at.gt(self.cutoff()))
            .first(&mut conn)
            .optional()
            .map_err(|e| PersistenceError::Query(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn upsert(&self, entry: &WeatherCacheEntry) -> Result<()> {
        let row = Self::to_row(entry)?;
        let mut conn = checkout(&self.pool)?;

        diesel::replace_into(weather_cache::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::Query(e.to_string()))?;

        Ok(())
    }

    async fn prune_expired(&self) -> Result<usize> {
        let mut conn = checkout(&self.pool)?;

        diesel::delete(weather_cache::table.filter(weather_cache::fetched_at.le(self.cutoff())))
            .execute(&mut conn)
            .map_err(|e| PersistenceError::Query(e.to_string()).into())
    }
}
