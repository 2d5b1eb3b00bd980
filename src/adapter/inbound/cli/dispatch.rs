//! Command dispatch.

use super::command::{Cli, Commands};
use super::output::{self, OutputConfig};
use super::{board, maintenance, run};
use crate::application::services::Services;
use crate::error::Result;

/// Configure output for `cli` and run its command.
///
/// # Errors
/// Propagates the command's error.
pub async fn execute(cli: &Cli, services: &Services) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match &cli.command {
        Commands::Run => run::execute(services).await,
        Commands::Tick => maintenance::tick(services).await,
        Commands::Reconcile => maintenance::reconcile(services).await,
        Commands::Reset(args) => maintenance::reset(services, args).await,
        Commands::Seed => maintenance::seed(services).await,
        Commands::Board(args) => board::board(services, args).await,
        Commands::Forecast(args) => board::forecast(services, args).await,
    }
}
