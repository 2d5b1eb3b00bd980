//! In-memory store implementations.
//!
//! [`MemoryFlightStore`] records saves and can be told to fail;
//! [`MemoryWeatherStore`] applies the same lazy TTL rule as the SQLite store.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use parking_lot::{Mutex, RwLock};

use crate::domain::{AirportCode, Flight, FlightId, WeatherCacheEntry};
use crate::error::{PersistenceError, Result};
use crate::port::{
    Clock, FlightFilter, FlightOrder, FlightQuery, FlightStore, StatusPatch, WeatherCacheStore,
};

/// Vec-backed [`FlightStore`].
#[derive(Default)]
pub struct MemoryFlightStore {
    flights: RwLock<Vec<Flight>>,
    saved: Mutex<Vec<FlightId>>,
    failing_saves: Mutex<HashSet<FlightId>>,
    fail_finds: AtomicBool,
    find_calls: AtomicUsize,
}

impl MemoryFlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flights(flights: Vec<Flight>) -> Self {
        Self {
            flights: RwLock::new(flights),
            ..Self::default()
        }
    }

    pub fn get(&self, id: &FlightId) -> Option<Flight> {
        self.flights.read().iter().find(|f| &f.id == id).cloned()
    }

    pub fn all(&self) -> Vec<Flight> {
        self.flights.read().clone()
    }

    /// Ids passed to successful `save` calls, in order.
    pub fn saved(&self) -> Vec<FlightId> {
        self.saved.lock().clone()
    }

    /// Make every `save` of this flight fail.
    pub fn fail_saves_for(&self, id: FlightId) {
        self.failing_saves.lock().insert(id);
    }

    /// Make `find` fail until switched back off.
    pub fn fail_finds(&self, fail: bool) {
        self.fail_finds.store(fail, Ordering::SeqCst);
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlightStore for MemoryFlightStore {
    async fn find(&self, query: &FlightQuery) -> Result<Vec<Flight>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_finds.load(Ordering::SeqCst) {
            return Err(PersistenceError::Query("scripted find failure".to_string()).into());
        }

        let mut flights: Vec<Flight> = self
            .flights
            .read()
            .iter()
            .filter(|f| query.filter.matches(f))
            .cloned()
            .collect();
        flights.sort_by_key(|f| f.departure_time);
        if query.order == FlightOrder::DepartureDescending {
            flights.reverse();
        }
        Ok(flights)
    }

    async fn save(&self, flight: &Flight) -> Result<()> {
        if self.failing_saves.lock().contains(&flight.id) {
            return Err(PersistenceError::Query(format!("scripted save failure for {}", flight.id)).into());
        }

        let mut flights = self.flights.write();
        let slot = flights
            .iter_mut()
            .find(|f| f.id == flight.id)
            .ok_or_else(|| PersistenceError::NotFound(flight.id.to_string()))?;
        *slot = flight.clone();
        self.saved.lock().push(flight.id.clone());
        Ok(())
    }

    async fn update_many(&self, filter: &FlightFilter, patch: &StatusPatch) -> Result<usize> {
        let mut updated = 0;
        for flight in self.flights.write().iter_mut().filter(|f| filter.matches(f)) {
            flight.status = patch.status;
            flight.last_status_update = patch.last_status_update;
            updated += 1;
        }
        Ok(updated)
    }

    async fn insert_many(&self, flights: &[Flight]) -> Result<usize> {
        self.flights.write().extend_from_slice(flights);
        Ok(flights.len())
    }

    async fn delete_all(&self) -> Result<usize> {
        let mut flights = self.flights.write();
        let removed = flights.len();
        flights.clear();
        Ok(removed)
    }
}

/// HashMap-backed [`WeatherCacheStore`] with lazy TTL expiry.
pub struct MemoryWeatherStore {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<(AirportCode, NaiveDate), WeatherCacheEntry>>,
}

impl MemoryWeatherStore {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stored entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_live(&self, entry: &WeatherCacheEntry) -> bool {
        self.clock.now() < entry.fetched_at + self.ttl
    }
}

#[async_trait]
impl WeatherCacheStore for MemoryWeatherStore {
    async fn get(
        &self,
        airport: &AirportCode,
        date: NaiveDate,
    ) -> Result<Option<WeatherCacheEntry>> {
        Ok(self
            .entries
            .read()
            .get(&(airport.clone(), date))
            .filter(|entry| self.is_live(entry))
            .cloned())
    }

    async fn upsert(&self, entry: &WeatherCacheEntry) -> Result<()> {
        self.entries
            .write()
            .insert((entry.airport.clone(), entry.date), entry.clone());
        Ok(())
    }

    async fn prune_expired(&self) -> Result<usize> {
        let mut entries = self.entries.write();
        let before = entries.len();
        let now = self.clock.now();
        entries.retain(|_, entry| now < entry.fetched_at + self.ttl);
        Ok(before - entries.len())
    }
}
