//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Weather │            │   Store     │              │  Clock /  │
//! │Provider │            │   Adapter   │              │  Random   │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;

pub use outbound::runtime::{Clock, RandomSource};
pub use outbound::store::{
    FlightFilter, FlightOrder, FlightQuery, FlightStore, StatusPatch, WeatherCacheStore,
};
pub use outbound::weather::{AirportDirectory, PrecipitationField, ProviderHour, WeatherProvider};
