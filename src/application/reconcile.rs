//! Startup reconciliation of stale flights.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DayWindow, FlightStatus};
use crate::error::Result;
use crate::port::{Clock, FlightFilter, FlightStore, StatusPatch};

/// One-shot pass that closes out flights left active from earlier days.
///
/// Runs before the scheduler's first tick; the scheduler only looks at the
/// current day, so anything older would otherwise stay active forever.
pub struct StartupReconciler {
    store: Arc<dyn FlightStore>,
    clock: Arc<dyn Clock>,
}

impl StartupReconciler {
    pub fn new(store: Arc<dyn FlightStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Mark every non-terminal flight departing before local midnight today
    /// as `Departed`. Returns the number of flights updated.
    ///
    /// # Errors
    /// Returns an error if the bulk update fails.
    pub async fn reconcile(&self) -> Result<usize> {
        let now = self.clock.now();
        let today = DayWindow::containing(now);
        let filter = FlightFilter::all()
            .departing_before(today.start)
            .non_terminal();
        let patch = StatusPatch {
            status: FlightStatus::Departed,
            last_status_update: now,
        };

        let updated = self.store.update_many(&filter, &patch).await?;
        info!(updated, cutoff = %today.start, "Reconciled stale flights");
        Ok(updated)
    }
}
