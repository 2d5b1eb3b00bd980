//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: flight and forecast
//! storage, the weather provider, the airport directory, time and randomness.

pub mod runtime;
pub mod store;
pub mod weather;
