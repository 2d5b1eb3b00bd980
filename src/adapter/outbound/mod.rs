//! Outbound adapters (driven side).

pub mod airport;
pub mod runtime;
pub mod sqlite;
pub mod visual_crossing;
