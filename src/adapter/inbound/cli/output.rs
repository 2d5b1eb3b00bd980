//! CLI output formatting.
//!
//! Human-readable lines and tables by default, one JSON document per command
//! in JSON mode. Quiet mode suppresses everything except JSON documents and
//! errors.

use std::fmt::Display;
use std::sync::OnceLock;

use parking_lot::RwLock;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Emit machine-readable JSON instead of text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    *config_cell().read()
}

fn regular_output_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

/// Replace the global output configuration.
pub fn configure(config: OutputConfig) {
    *config_cell().write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Print a section title.
pub fn section(title: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!();
    println!("{title}");
}

/// Print an aligned label/value pair.
pub fn field(label: &str, value: impl Display) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!("  {label:<14} {value}");
}

/// Print a completion message.
pub fn success(message: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!("✓ {message}");
}

/// Print a warning. Shown in quiet mode, never in JSON mode.
pub fn warning(message: &str) {
    if read_config().json {
        return;
    }
    println!("! {message}");
}

/// Print an error to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!("{}", serde_json::json!({ "error": message }));
        return;
    }
    eprintln!("✗ {message}");
}

/// Render rows as a table.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

/// Print a value as pretty JSON regardless of quiet mode.
pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => error(&format!("failed to serialize output: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_and_json_suppress_regular_output() {
        assert!(!regular_output_suppressed(OutputConfig::new(false, false)));
        assert!(regular_output_suppressed(OutputConfig::new(false, true)));
        assert!(regular_output_suppressed(OutputConfig::new(true, false)));
    }

    #[test]
    fn default_is_human_readable() {
        assert_eq!(OutputConfig::default(), OutputConfig::new(false, false));
    }
}
