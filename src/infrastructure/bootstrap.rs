//! Composition root: builds the production adapters from [`Config`] and wires
//! them into [`Services`].

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use super::config::airport::build_directory;
use super::config::settings::Config;
use crate::adapter::outbound::runtime::{SeededRandom, SystemClock};
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::{SqliteFlightStore, SqliteWeatherStore};
use crate::adapter::outbound::visual_crossing::VisualCrossingClient;
use crate::application::services::Services;
use crate::application::weather::cache::WeatherCache;
use crate::error::Result;
use crate::port::{AirportDirectory, Clock, FlightStore, RandomSource, WeatherCacheStore};

/// Open the database, run migrations and wire the production adapters.
///
/// # Errors
/// Returns an error if the airport list is invalid or the database cannot be
/// opened or migrated.
pub fn build_services(config: &Config) -> Result<Services> {
    let airports: Arc<dyn AirportDirectory> = Arc::new(build_directory(&config.airports)?);

    let pool = create_pool(&config.database)?;
    run_migrations(&pool)?;
    info!(database = %config.database, "Database ready");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let random: Arc<dyn RandomSource> = Arc::new(SeededRandom::from_config(config.status.seed));
    if config.status.seed.is_some() {
        info!("Random source seeded from configuration");
    }

    let ttl_seconds = i64::try_from(config.weather.cache_ttl_seconds).unwrap_or(i64::MAX);
    let flights: Arc<dyn FlightStore> = Arc::new(SqliteFlightStore::new(pool.clone()));
    let weather_store: Arc<dyn WeatherCacheStore> = Arc::new(SqliteWeatherStore::new(
        pool,
        Duration::seconds(ttl_seconds),
        Arc::clone(&clock),
    ));

    if config.weather.api_key.is_none() {
        warn!("VISUAL_CROSSING_KEY not set; forecasts will be unavailable");
    }
    let provider = Arc::new(VisualCrossingClient::from_config(&config.weather));
    let weather = Arc::new(WeatherCache::new(
        Arc::clone(&weather_store),
        provider,
        Arc::clone(&airports),
        Arc::clone(&clock),
    ));

    Ok(Services {
        flights,
        weather_store,
        airports,
        clock,
        random,
        weather,
        status_config: config.status.clone(),
        scheduler_config: config.scheduler.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use crate::infrastructure::config::airport::AirportConfig;

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config {
            database: dir.path().join("app.db").to_string_lossy().into_owned(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn build_wires_an_empty_database() {
        let dir = tempfile::tempdir().unwrap();
        let services = build_services(&config_in(&dir)).unwrap();

        assert_eq!(services.reconciler().reconcile().await.unwrap(), 0);
        assert_eq!(services.airports.codes().len(), 2);
    }

    #[tokio::test]
    async fn seeded_database_feeds_the_scheduler() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        config.status.seed = Some(11);
        let services = build_services(&config).unwrap();

        let inserted = services.seeder().seed().await.unwrap();
        // 7 days, 2 airports, 9 departures each.
        assert_eq!(inserted, 7 * 2 * 9);

        let report = services.scheduler().tick().await.unwrap();
        assert_eq!(report.failed, 0);
        assert!(report.evaluated <= 2 * 9);
    }

    #[test]
    fn invalid_airport_fails_before_opening_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        config.airports = vec![AirportConfig {
            code: "NOT AN AIRPORT".into(),
            name: String::new(),
            weather_location: "Nowhere".into(),
        }];

        let result = build_services(&config);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(!dir.path().join("app.db").exists());
    }
}
