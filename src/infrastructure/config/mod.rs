//! Infrastructure configuration modules.

pub mod airport;
pub mod logging;
pub mod settings;
