//! SQLite flight store implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use super::database::connection::{checkout, DbPool};
use super::database::model::FlightRow;
use super::database::schema::flights;
use super::{parse_timestamp, timestamp};
use crate::domain::{AirportCode, DayOfWeek, Flight, FlightId, FlightStatus, Route, TimeOfDay};
use crate::error::{PersistenceError, Result};
use crate::port::{FlightFilter, FlightOrder, FlightQuery, FlightStore, StatusPatch};

const TABLE: &str = "flights";

/// SQLite-backed flight store.
pub struct SqliteFlightStore {
    pool: DbPool,
}

impl SqliteFlightStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Boxed `SELECT` over `flights` restricted by `filter`.
    fn filtered(filter: &FlightFilter) -> flights::BoxedQuery<'static, Sqlite> {
        let mut query = flights::table.into_boxed();

        if let Some(from) = filter.departure_from {
            query = query.filter(flights::departure_time.ge(timestamp(from)));
        }
        if let Some(before) = filter.departure_before {
            query = query.filter(flights::departure_time.lt(timestamp(before)));
        }
        if !filter.exclude_statuses.is_empty() {
            let labels: Vec<String> = filter
                .exclude_statuses
                .iter()
                .map(|status| status.as_str().to_string())
                .collect();
            query = query.filter(flights::status.ne_all(labels));
        }
        if let Some(airport) = &filter.airport {
            query = query.filter(flights::departure_airport.eq(airport.as_str().to_string()));
        }
        if let Some(day) = filter.day_of_week {
            query = query.filter(flights::day_of_week.eq(day.as_str()));
        }
        if let Some(time_of_day) = filter.time_of_day {
            query = query.filter(flights::time_of_day.eq(time_of_day.as_str()));
        }

        query
    }

    fn to_row(flight: &Flight) -> FlightRow {
        FlightRow {
            id: flight.id.to_string(),
            flight_number: flight.flight_number.clone(),
            departure_airport: flight.route.departure.to_string(),
            arrival_airport: flight.route.arrival.to_string(),
            departure_time: timestamp(flight.departure_time),
            arrival_time: timestamp(flight.arrival_time),
            day_of_week: flight.day_of_week.as_str().to_string(),
            time_of_day: flight.time_of_day.as_str().to_string(),
            status: flight.status.as_str().to_string(),
            last_status_update: timestamp(flight.last_status_update),
        }
    }

    fn from_row(row: FlightRow) -> Result<Flight> {
        let corrupt = |reason: String| PersistenceError::Corrupt {
            table: TABLE,
            reason: format!("flight {}: {reason}", row.id),
        };
        let departure =
            AirportCode::parse(&row.departure_airport).map_err(|e| corrupt(e.to_string()))?;
        let arrival =
            AirportCode::parse(&row.arrival_airport).map_err(|e| corrupt(e.to_string()))?;
        let day_of_week = row.day_of_week.parse::<DayOfWeek>().map_err(|e| corrupt(e.to_string()))?;
        let time_of_day = row.time_of_day.parse::<TimeOfDay>().map_err(|e| corrupt(e.to_string()))?;
        let status = row.status.parse::<FlightStatus>().map_err(|e| corrupt(e.to_string()))?;

        Ok(Flight {
            departure_time: parse_timestamp(TABLE, &row.departure_time)?,
            arrival_time: parse_timestamp(TABLE, &row.arrival_time)?,
            last_status_update: parse_timestamp(TABLE, &row.last_status_update)?,
            route: Route::new(departure, arrival),
            day_of_week,
            time_of_day,
            status,
            flight_number: row.flight_number,
            id: FlightId::new(row.id),
        })
    }
}

#[async_trait]
impl FlightStore for SqliteFlightStore {
    async fn find(&self, query: &FlightQuery) -> Result<Vec<Flight>> {
        let mut conn = checkout(&self.pool)?;

        let select = Self::filtered(&query.filter);
        let select = match query.order {
            FlightOrder::DepartureAscending => select.order(flights::departure_time.asc()),
            FlightOrder::DepartureDescending => select.order(flights::departure_time.desc()),
        };
        let rows: Vec<FlightRow> = select
            .load(&mut conn)
            .map_err(|e| PersistenceError::Query(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn save(&self, flight: &Flight) -> Result<()> {
        let row = Self::to_row(flight);
        let mut conn = checkout(&self.pool)?;

        let updated = diesel::update(flights::table.find(&row.id))
            .set(&row)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::Query(e.to_string()))?;

        if updated == 0 {
            return Err(PersistenceError::NotFound(row.id).into());
        }
        Ok(())
    }

    async fn update_many(&self, filter: &FlightFilter, patch: &StatusPatch) -> Result<usize> {
        let mut conn = checkout(&self.pool)?;
        let status = patch.status.as_str();
        let stamped = timestamp(patch.last_status_update);

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let ids: Vec<String> = Self::filtered(filter).select(flights::id).load(conn)?;
            if ids.is_empty() {
                return Ok(0);
            }
            diesel::update(flights::table.filter(flights::id.eq_any(&ids)))
                .set((
                    flights::status.eq(status),
                    flights::last_status_update.eq(&stamped),
                ))
                .execute(conn)
        })
        .map_err(|e| PersistenceError::Query(e.to_string()).into())
    }

    async fn insert_many(&self, flights_to_insert: &[Flight]) -> Result<usize> {
        if flights_to_insert.is_empty() {
            return Ok(0);
        }
        let rows: Vec<FlightRow> = flights_to_insert.iter().map(Self::to_row).collect();
        let mut conn = checkout(&self.pool)?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::insert_into(flights::table).values(&rows).execute(conn)
        })
        .map_err(|e| PersistenceError::Query(e.to_string()).into())
    }

    async fn delete_all(&self) -> Result<usize> {
        let mut conn = checkout(&self.pool)?;

        diesel::delete(flights::table)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::Query(e.to_string()).into())
    }
}
