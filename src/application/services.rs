//! Service container handed to inbound adapters.
//!
//! Holds the outbound ports and configuration once; each accessor builds the
//! use-case object an inbound command needs.

use std::sync::Arc;

use super::admin::StatusAdmin;
use super::board::FlightBoard;
use super::reconcile::StartupReconciler;
use super::scheduler::config::SchedulerConfig;
use super::scheduler::service::StatusScheduler;
use super::seed::FlightSeeder;
use super::status::config::StatusConfig;
use super::status::engine::StatusEngine;
use super::weather::cache::WeatherCache;
use super::weather::lookup::ForecastLookup;
use crate::port::{AirportDirectory, Clock, FlightStore, RandomSource, WeatherCacheStore};

/// Shared ports plus the settings the use cases need.
pub struct Services {
    pub flights: Arc<dyn FlightStore>,
    pub weather_store: Arc<dyn WeatherCacheStore>,
    pub airports: Arc<dyn AirportDirectory>,
    pub clock: Arc<dyn Clock>,
    pub random: Arc<dyn RandomSource>,
    pub weather: Arc<WeatherCache>,
    pub status_config: StatusConfig,
    pub scheduler_config: SchedulerConfig,
}

impl Services {
    /// A scheduler with its own engine over the shared ports.
    #[must_use]
    pub fn scheduler(&self) -> Arc<StatusScheduler> {
        let engine = Arc::new(StatusEngine::new(
            self.status_config.clone(),
            Arc::clone(&self.random),
        ));
        let forecasts: Arc<dyn ForecastLookup> = self.weather.clone();
        Arc::new(StatusScheduler::new(
            self.scheduler_config.clone(),
            Arc::clone(&self.flights),
            engine,
            forecasts,
            Arc::clone(&self.clock),
        ))
    }

    #[must_use]
    pub fn reconciler(&self) -> StartupReconciler {
        StartupReconciler::new(Arc::clone(&self.flights), Arc::clone(&self.clock))
    }

    #[must_use]
    pub fn admin(&self) -> StatusAdmin {
        StatusAdmin::new(Arc::clone(&self.flights), Arc::clone(&self.clock))
    }

    #[must_use]
    pub fn board(&self) -> FlightBoard {
        FlightBoard::new(Arc::clone(&self.flights), Arc::clone(&self.weather))
    }

    #[must_use]
    pub fn seeder(&self) -> FlightSeeder {
        FlightSeeder::new(
            Arc::clone(&self.flights),
            Arc::clone(&self.airports),
            Arc::clone(&self.clock),
            Arc::clone(&self.random),
        )
    }
}
