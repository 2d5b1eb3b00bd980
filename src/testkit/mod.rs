//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`]: `FixedClock`, a settable [`Clock`](crate::port::Clock).
//! - [`domain`]: Builders for flights, airport codes and provider hours.
//! - [`forecast`]: `StaticForecast`, a canned forecast lookup for the engine.
//! - [`provider`]: `FakeWeatherProvider` that records requests.
//! - [`random`]: `FixedRandom` and `ScriptedRandom` random sources.
//! - [`store`]: In-memory flight and weather cache stores.

pub mod clock;
pub mod domain;
pub mod forecast;
pub mod provider;
pub mod random;
pub mod store;
