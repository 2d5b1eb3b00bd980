//! Application services.
//!
//! Use cases built on the domain model and outbound ports: weather loading,
//! status progression and scheduling, plus the operator-facing board, reset
//! and seeding flows.

pub mod admin;
pub mod board;
pub mod reconcile;
pub mod scheduler;
pub mod seed;
pub mod services;
pub mod status;
pub mod weather;
