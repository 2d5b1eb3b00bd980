//! Handler for the `run` command.

use tokio::signal;
use tracing::{info, warn};

use crate::adapter::inbound::cli::output;
use crate::application::services::Services;
use crate::error::Result;

/// Reconcile, then drive the scheduler until Ctrl-C.
pub async fn execute(services: &Services) -> Result<()> {
    let reconciled = services.reconciler().reconcile().await?;

    match services.weather_store.prune_expired().await {
        Ok(0) => {}
        Ok(pruned) => info!(pruned, "Pruned expired forecasts"),
        Err(e) => warn!(error = %e, "Failed to prune expired forecasts"),
    }

    let scheduler = services.scheduler();
    let interval = services.scheduler_config.interval_seconds;

    output::section("Status scheduler");
    output::field("Interval", format!("{interval}s"));
    output::field("Airports", services.airports.codes().len());
    output::field("Reconciled", reconciled);

    let handle = scheduler.start();
    info!("flightboard running, press Ctrl-C to stop");

    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");

    handle.shutdown().await;
    output::success("Scheduler stopped");
    Ok(())
}
