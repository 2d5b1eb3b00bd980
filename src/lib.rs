//! Flightboard - weather-aware flight status simulation.
//!
//! A periodic scheduler walks today's flights through a status lifecycle
//! (on time, boarding, boarded, departed, with delays and cancellations),
//! consulting a cached hourly forecast so hazardous weather delays departures.
//! A departure board query joins flights with the forecast for their hour.
//!
//! # Architecture
//!
//! - [`domain`] - Flights, statuses, weather samples and the hazard rule
//! - [`port`] - Store, weather provider, clock and randomness traits
//! - [`application`] - Weather cache, status engine, scheduler, reconciler,
//!   board query, resets and seeding
//! - [`adapter`] - SQLite stores, Visual Crossing client and the CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use flightboard::infrastructure::bootstrap::build_services;
//! use flightboard::infrastructure::config::settings::Config;
//!
//! # async fn demo() -> flightboard::error::Result<()> {
//! let services = build_services(&Config::load("config.toml")?)?;
//! let report = services.scheduler().tick().await?;
//! println!("{} flights changed", report.mutated);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
