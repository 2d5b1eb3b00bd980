//! Persistence ports for flights and cached forecasts.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{AirportCode, DayOfWeek, Flight, FlightStatus, TimeOfDay, WeatherCacheEntry};
use crate::error::Result;

/// Predicate over flights. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightFilter {
    /// Departure at or after this instant.
    pub departure_from: Option<DateTime<Utc>>,
    /// Departure strictly before this instant.
    pub departure_before: Option<DateTime<Utc>>,
    /// Statuses to leave out.
    pub exclude_statuses: Vec<FlightStatus>,
    pub airport: Option<AirportCode>,
    pub day_of_week: Option<DayOfWeek>,
    pub time_of_day: Option<TimeOfDay>,
}

impl FlightFilter {
    /// Matches every flight.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn departing_from(mut self, from: DateTime<Utc>) -> Self {
        self.departure_from = Some(from);
        self
    }

    #[must_use]
    pub const fn departing_before(mut self, before: DateTime<Utc>) -> Self {
        self.departure_before = Some(before);
        self
    }

    #[must_use]
    pub fn excluding(mut self, statuses: &[FlightStatus]) -> Self {
        self.exclude_statuses.extend_from_slice(statuses);
        self
    }

    /// Leave out `Departed` and `Cancelled` flights.
    #[must_use]
    pub fn non_terminal(self) -> Self {
        self.excluding(&FlightStatus::TERMINAL)
    }

    #[must_use]
    pub fn at_airport(mut self, airport: AirportCode) -> Self {
        self.airport = Some(airport);
        self
    }

    #[must_use]
    pub const fn on_day(mut self, day: DayOfWeek) -> Self {
        self.day_of_week = Some(day);
        self
    }

    #[must_use]
    pub const fn at_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    /// Evaluate the predicate in memory.
    #[must_use]
    pub fn matches(&self, flight: &Flight) -> bool {
        self.departure_from
            .map_or(true, |from| flight.departure_time >= from)
            && self
                .departure_before
                .map_or(true, |before| flight.departure_time < before)
            && !self.exclude_statuses.contains(&flight.status)
            && self
                .airport
                .as_ref()
                .map_or(true, |code| &flight.route.departure == code)
            && self.day_of_week.map_or(true, |day| flight.day_of_week == day)
            && self
                .time_of_day
                .map_or(true, |tod| flight.time_of_day == tod)
    }
}

/// Result ordering for [`FlightStore::find`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlightOrder {
    #[default]
    DepartureAscending,
    DepartureDescending,
}

/// A filter plus an ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightQuery {
    pub filter: FlightFilter,
    pub order: FlightOrder,
}

impl FlightQuery {
    #[must_use]
    pub fn new(filter: FlightFilter) -> Self {
        Self {
            filter,
            order: FlightOrder::default(),
        }
    }

    #[must_use]
    pub const fn ordered(mut self, order: FlightOrder) -> Self {
        self.order = order;
        self
    }
}

/// Bulk status assignment applied by [`FlightStore::update_many`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPatch {
    pub status: FlightStatus,
    pub last_status_update: DateTime<Utc>,
}

/// Storage operations for flights.
#[async_trait]
pub trait FlightStore: Send + Sync {
    /// Flights matching the query, in the requested order.
    async fn find(&self, query: &FlightQuery) -> Result<Vec<Flight>>;

    /// Write back an existing flight.
    ///
    /// Fails with [`PersistenceError::NotFound`](crate::error::PersistenceError::NotFound)
    /// when the flight does not exist.
    async fn save(&self, flight: &Flight) -> Result<()>;

    /// Apply a status patch to every matching flight. Returns count affected.
    async fn update_many(&self, filter: &FlightFilter, patch: &StatusPatch) -> Result<usize>;

    /// Insert new flights. Returns count inserted.
    async fn insert_many(&self, flights: &[Flight]) -> Result<usize>;

    /// Delete every flight. Returns count deleted.
    async fn delete_all(&self) -> Result<usize>;
}

/// Storage operations for cached forecasts.
///
/// Entries older than the store's TTL behave as absent on read, whether the
/// store sweeps them or checks lazily.
#[async_trait]
pub trait WeatherCacheStore: Send + Sync {
    /// Live entry for the key, if any.
    async fn get(&self, airport: &AirportCode, date: NaiveDate)
        -> Result<Option<WeatherCacheEntry>>;

    /// Insert or replace the entry for its (airport, date) key.
    async fn upsert(&self, entry: &WeatherCacheEntry) -> Result<()>;

    /// Delete all expired entries. Returns count deleted.
    async fn prune_expired(&self) -> Result<usize>;
}
