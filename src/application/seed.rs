//! Rolling-window flight seeding.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveTime};
use tracing::info;

use crate::domain::calendar::local_to_utc;
use crate::domain::{AirportCode, Flight, Route, TimeOfDay};
use crate::error::Result;
use crate::port::{AirportDirectory, Clock, FlightStore, RandomSource};

/// Days around today covered by a seed run.
pub const DAY_OFFSETS: std::ops::RangeInclusive<i64> = -3..=3;

const AIRLINES: [&str; 8] = ["AA", "DL", "UA", "WN", "B6", "AS", "NK", "F9"];

const DESTINATIONS: [&str; 12] = [
    "ATL", "ORD", "DFW", "DEN", "SFO", "SEA", "MIA", "BOS", "LAS", "PHX", "JFK", "LAX",
];

/// Scheduled departure hours per bucket.
const fn template_hours(bucket: TimeOfDay) -> [u32; 3] {
    match bucket {
        TimeOfDay::Morning => [6, 8, 10],
        TimeOfDay::Afternoon => [12, 14, 16],
        TimeOfDay::Evening => [18, 20, 22],
    }
}

/// Wipes the flight store and generates a week of departures per airport.
pub struct FlightSeeder {
    store: Arc<dyn FlightStore>,
    airports: Arc<dyn AirportDirectory>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl FlightSeeder {
    pub fn new(
        store: Arc<dyn FlightStore>,
        airports: Arc<dyn AirportDirectory>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            store,
            airports,
            clock,
            random,
        }
    }

    /// Replace every flight with a fresh schedule. Returns the number inserted.
    ///
    /// # Errors
    /// Returns an error if the store cannot be cleared or written.
    pub async fn seed(&self) -> Result<usize> {
        let now = self.clock.now();
        let today = now.with_timezone(&Local).date_naive();
        let airports = self.airports.codes();

        let mut flights = Vec::new();
        for offset in DAY_OFFSETS {
            let date = today + Duration::days(offset);
            for airport in &airports {
                for bucket in [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening] {
                    for hour in template_hours(bucket) {
                        let minute = self.random.int_in(0, 59) as u32;
                        let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                            continue;
                        };
                        let departure = local_to_utc(date.and_time(time));
                        // 1h to 8h in 15 minute steps
                        let block = Duration::minutes(15 * self.random.int_in(4, 32));
                        let route = Route::new(airport.clone(), self.destination(airport)?);
                        flights.push(Flight::try_new(
                            self.flight_number(),
                            route,
                            departure,
                            departure + block,
                            now,
                        )?);
                    }
                }
            }
        }

        let removed = self.store.delete_all().await?;
        let inserted = self.store.insert_many(&flights).await?;
        info!(
            removed,
            inserted,
            airports = airports.len(),
            "Seeded flight schedule"
        );
        Ok(inserted)
    }

    fn flight_number(&self) -> String {
        let airline = AIRLINES[self.index(AIRLINES.len())];
        format!("{airline}{}", self.random.int_in(1, 9999))
    }

    fn destination(&self, departure: &AirportCode) -> Result<AirportCode> {
        let candidates: Vec<&str> = DESTINATIONS
            .into_iter()
            .filter(|code| *code != departure.as_str())
            .collect();
        Ok(AirportCode::parse(candidates[self.index(candidates.len())])?)
    }

    /// Uniform index in `0..len`; `len` must be non-zero.
    fn index(&self, len: usize) -> usize {
        self.random.int_in(0, len as i64 - 1) as usize
    }
}
