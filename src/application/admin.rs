//! Administrative status resets.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::domain::FlightStatus;
use crate::error::Result;
use crate::port::{Clock, FlightFilter, FlightStore, StatusPatch};

/// Which flights a reset returns to `OnTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    /// Every flight that has not departed.
    InProgress,
    /// Every flight, departed or not.
    All,
}

impl fmt::Display for ResetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "in-progress",
            Self::All => "all",
        })
    }
}

/// Bulk status resets for operators.
pub struct StatusAdmin {
    store: Arc<dyn FlightStore>,
    clock: Arc<dyn Clock>,
}

impl StatusAdmin {
    pub fn new(store: Arc<dyn FlightStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Set flights in `scope` back to `OnTime`. Returns the number updated.
    ///
    /// # Errors
    /// Returns an error if the bulk update fails.
    pub async fn reset(&self, scope: ResetScope) -> Result<usize> {
        let filter = match scope {
            ResetScope::InProgress => FlightFilter::all().excluding(&[FlightStatus::Departed]),
            ResetScope::All => FlightFilter::all(),
        };
        let patch = StatusPatch {
            status: FlightStatus::OnTime,
            last_status_update: self.clock.now(),
        };

        let updated = self.store.update_many(&filter, &patch).await?;
        info!(scope = %scope, updated, "Reset flight statuses");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::clock::FixedClock;
    use crate::testkit::domain::{flight_departing_in, local_noon_today};
    use crate::testkit::store::MemoryFlightStore;

    fn store_with_every_status() -> Arc<MemoryFlightStore> {
        let now = local_noon_today();
        let flights = FlightStatus::ALL
            .into_iter()
            .map(|status| flight_departing_in(now, 30, status))
            .collect();
        Arc::new(MemoryFlightStore::with_flights(flights))
    }

    #[tokio::test]
    async fn soft_reset_leaves_departed_flights() {
        let store = store_with_every_status();
        let admin = StatusAdmin::new(store.clone(), Arc::new(FixedClock::new(local_noon_today())));

        let updated = admin.reset(ResetScope::InProgress).await.unwrap();

        assert_eq!(updated, FlightStatus::ALL.len() - 1);
        let statuses: Vec<_> = store.all().into_iter().map(|f| f.status).collect();
        assert_eq!(
            statuses.iter().filter(|s| **s == FlightStatus::Departed).count(),
            1
        );
        assert!(statuses
            .iter()
            .all(|s| matches!(s, FlightStatus::OnTime | FlightStatus::Departed)));
    }

    #[tokio::test]
    async fn hard_reset_touches_everything() {
        let store = store_with_every_status();
        let now = local_noon_today();
        let admin = StatusAdmin::new(store.clone(), Arc::new(FixedClock::new(now)));

        let updated = admin.reset(ResetScope::All).await.unwrap();

        assert_eq!(updated, FlightStatus::ALL.len());
        assert!(store
            .all()
            .iter()
            .all(|f| f.status == FlightStatus::OnTime && f.last_status_update == now));
    }
}
