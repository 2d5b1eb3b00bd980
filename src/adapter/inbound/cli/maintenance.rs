//! Handlers for one-shot maintenance commands: `tick`, `reconcile`,
//! `reset` and `seed`.

use serde_json::json;

use crate::adapter::inbound::cli::command::ResetArgs;
use crate::adapter::inbound::cli::output;
use crate::application::admin::ResetScope;
use crate::application::services::Services;
use crate::error::Result;

/// Run a single scheduler tick.
pub async fn tick(services: &Services) -> Result<()> {
    let report = services.scheduler().tick().await?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "tick",
            "evaluated": report.evaluated,
            "mutated": report.mutated,
            "failed": report.failed,
        }));
        return Ok(());
    }

    output::section("Tick");
    output::field("Evaluated", report.evaluated);
    output::field("Changed", report.mutated);
    if report.failed > 0 {
        output::warning(&format!("{} status changes could not be saved", report.failed));
    }
    Ok(())
}

pub async fn reconcile(services: &Services) -> Result<()> {
    let updated = services.reconciler().reconcile().await?;

    if output::is_json() {
        output::json_output(&json!({ "command": "reconcile", "updated": updated }));
    } else {
        output::success(&format!("Marked {updated} stale flights as departed"));
    }
    Ok(())
}

pub async fn reset(services: &Services, args: &ResetArgs) -> Result<()> {
    let scope = if args.all {
        ResetScope::All
    } else {
        ResetScope::InProgress
    };
    let updated = services.admin().reset(scope).await?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "reset",
            "scope": scope.to_string(),
            "updated": updated,
        }));
    } else {
        output::success(&format!("Reset {updated} flights to on-time ({scope})"));
    }
    Ok(())
}

pub async fn seed(services: &Services) -> Result<()> {
    let inserted = services.seeder().seed().await?;

    if output::is_json() {
        output::json_output(&json!({ "command": "seed", "inserted": inserted }));
    } else {
        output::success(&format!("Seeded {inserted} flights"));
    }
    Ok(())
}
