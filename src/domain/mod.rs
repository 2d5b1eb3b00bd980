//! Domain types: flights, statuses, weather samples and the hazard rule.

pub mod alert;
pub mod calendar;
pub mod error;
pub mod flight;
pub mod id;
pub mod weather;

pub use alert::needs_alert;
pub use calendar::DayWindow;
pub use flight::{DayOfWeek, Flight, FlightDuration, FlightStatus, Route, TimeOfDay};
pub use id::{AirportCode, FlightId};
pub use weather::{HourlyForecast, WeatherCacheEntry, WeatherSample};
