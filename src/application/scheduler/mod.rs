//! Periodic flight status scheduling.

pub mod config;
pub mod service;
