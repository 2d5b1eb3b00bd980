use clap::Parser;
use tracing::error;

use flightboard::adapter::inbound::cli::command::Cli;
use flightboard::adapter::inbound::cli::{dispatch, output};
use flightboard::infrastructure::bootstrap::build_services;
use flightboard::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config {}: {e}", cli.config.display());
            std::process::exit(1);
        }
    };
    config.init_logging();

    let services = match build_services(&config) {
        Ok(services) => services,
        Err(e) => {
            error!(error = %e, "Startup failed");
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatch::execute(&cli, &services).await {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
