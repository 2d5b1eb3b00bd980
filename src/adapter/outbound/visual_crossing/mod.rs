//! Visual Crossing timeline API integration.
//!
//! Fetches one day of hourly forecast per request:
//!
//! ```text
//! GET {base_url}/{location}/{date}/{date}?unitGroup=us&include=hours&key=...
//! ```

pub mod client;
pub mod dto;
pub mod settings;

pub use client::VisualCrossingClient;
pub use settings::{WeatherConfig, WeatherHttpConfig};
