//! Command-line interface definitions.
//!
//! Defines the CLI structure for the flightboard application using `clap`:
//! the long-running scheduler, one-shot maintenance commands and the
//! departure board query.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::error::DomainError;
use crate::domain::{AirportCode, DayOfWeek, TimeOfDay};

/// Weather-aware flight status simulator and departure board
#[derive(Parser, Debug)]
#[command(name = "flightboard")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print one JSON document instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the flightboard CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile stale flights, then advance statuses periodically until Ctrl-C
    Run,

    /// Advance every flight departing today once
    Tick,

    /// Mark flights from earlier days that never departed as departed
    Reconcile,

    /// Reset flight statuses to on-time
    Reset(ResetArgs),

    /// Replace all flights with a generated week of departures
    Seed,

    /// Show the departure board for an airport
    Board(BoardArgs),

    /// Show the hourly forecast for an airport and day
    Forecast(ForecastArgs),
}

/// Arguments for the `reset` command.
#[derive(Args, Debug, Default)]
pub struct ResetArgs {
    /// Reset departed flights too
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `board` command.
#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Departure airport code (e.g. JFK)
    #[arg(long, value_parser = parse_airport)]
    pub airport: AirportCode,

    /// Day of week (monday..sunday)
    #[arg(long, value_parser = parse_day)]
    pub day: DayOfWeek,

    /// Time of day (morning, afternoon, evening)
    #[arg(long = "time-of-day", value_parser = parse_time_of_day)]
    pub time_of_day: TimeOfDay,
}

/// Arguments for the `forecast` command.
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Airport code (e.g. JFK)
    #[arg(value_parser = parse_airport)]
    pub airport: AirportCode,

    /// Calendar date (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub date: NaiveDate,
}

fn parse_airport(value: &str) -> Result<AirportCode, String> {
    AirportCode::parse(value).map_err(|e| e.to_string())
}

fn parse_day(value: &str) -> Result<DayOfWeek, String> {
    value.parse().map_err(|e: DomainError| e.to_string())
}

fn parse_time_of_day(value: &str) -> Result<TimeOfDay, String> {
    value.parse().map_err(|e: DomainError| e.to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from(["flightboard", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["flightboard", "tick", "--config", "alt.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Tick));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }

    #[test]
    fn test_parse_reset_all() {
        let cli = Cli::try_parse_from(["flightboard", "reset", "--all"]).unwrap();
        if let Commands::Reset(args) = cli.command {
            assert!(args.all);
        } else {
            panic!("Expected Reset command");
        }

        let cli = Cli::try_parse_from(["flightboard", "reset"]).unwrap();
        assert!(matches!(cli.command, Commands::Reset(ResetArgs { all: false })));
    }

    #[test]
    fn test_parse_board() {
        let cli = Cli::try_parse_from([
            "flightboard",
            "board",
            "--airport",
            "jfk",
            "--day",
            "Friday",
            "--time-of-day",
            "evening",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        if let Commands::Board(args) = cli.command {
            assert_eq!(args.airport.as_str(), "JFK");
            assert_eq!(args.day, DayOfWeek::Friday);
            assert_eq!(args.time_of_day, TimeOfDay::Evening);
        } else {
            panic!("Expected Board command");
        }
    }

    #[test]
    fn test_board_rejects_unknown_bucket() {
        let result = Cli::try_parse_from([
            "flightboard",
            "board",
            "--airport",
            "JFK",
            "--day",
            "monday",
            "--time-of-day",
            "night",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_forecast() {
        let cli = Cli::try_parse_from(["flightboard", "forecast", "LAX", "2025-06-12"]).unwrap();
        assert!(!cli.json);
        if let Commands::Forecast(args) = cli.command {
            assert_eq!(args.airport.as_str(), "LAX");
            assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 6, 12).unwrap());
        } else {
            panic!("Expected Forecast command");
        }
    }

    #[test]
    fn test_forecast_rejects_bad_date() {
        assert!(Cli::try_parse_from(["flightboard", "forecast", "LAX", "12/06/2025"]).is_err());
    }

    #[test]
    fn test_parse_global_json_for_maintenance() {
        let cli = Cli::try_parse_from(["flightboard", "seed", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Seed));
        assert!(cli.json);
    }
}
