//! CLI module graph.

pub mod board;
pub mod command;
pub mod dispatch;
pub mod maintenance;
pub mod output;
pub mod run;
