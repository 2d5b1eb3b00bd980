//! Flight status progression.

pub mod config;
pub mod engine;
