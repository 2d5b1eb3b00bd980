//! Periodic status scheduler.
//!
//! ```text
//! interval tick
//!      |
//!      v
//! FlightStore::find(today, non-terminal) --> [Flight; n]
//!                                              |
//!                         buffer_unordered(max_concurrency)
//!                                              |
//!                          StatusEngine::evaluate(shared now)
//!                                              |
//!                                   changed? --> FlightStore::save
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use super::config::SchedulerConfig;
use crate::application::status::engine::StatusEngine;
use crate::application::weather::lookup::ForecastLookup;
use crate::domain::{DayWindow, Flight};
use crate::error::Result;
use crate::port::{Clock, FlightFilter, FlightQuery, FlightStore};

/// Counters for one scheduler tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Candidate flights run through the engine.
    pub evaluated: usize,
    /// Flights whose status changed and were persisted.
    pub mutated: usize,
    /// Flights whose status changed but could not be persisted.
    pub failed: usize,
}

enum Outcome {
    Unchanged,
    Mutated,
    Failed,
}

/// Handle for controlling the scheduler loop lifecycle.
pub struct SchedulerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the loop after any in-flight tick finishes and wait for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            error!(error = %e, "Scheduler task ended abnormally");
        }
    }
}

/// Drives [`StatusEngine`] over the current day's active flights.
///
/// Ticks never overlap: [`tick`](Self::tick) waits for a running tick and
/// [`try_tick`](Self::try_tick) skips instead.
pub struct StatusScheduler {
    config: SchedulerConfig,
    store: Arc<dyn FlightStore>,
    engine: Arc<StatusEngine>,
    forecasts: Arc<dyn ForecastLookup>,
    clock: Arc<dyn Clock>,
    guard: Mutex<()>,
}

impl StatusScheduler {
    pub fn new(
        config: SchedulerConfig,
        store: Arc<dyn FlightStore>,
        engine: Arc<StatusEngine>,
        forecasts: Arc<dyn ForecastLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            engine,
            forecasts,
            clock,
            guard: Mutex::new(()),
        }
    }

    /// Run one tick, waiting for any tick already in progress.
    ///
    /// # Errors
    /// Returns an error if candidate selection fails. Per-flight save
    /// failures are counted in [`TickReport::failed`] instead.
    pub async fn tick(&self) -> Result<TickReport> {
        let _running = self.guard.lock().await;
        self.run_tick().await
    }

    /// Run one tick unless another is in progress, in which case `None`.
    pub async fn try_tick(&self) -> Option<Result<TickReport>> {
        let _running = self.guard.try_lock().ok()?;
        Some(self.run_tick().await)
    }

    /// Spawn the periodic loop. The first tick fires immediately.
    ///
    /// Once shutdown is requested no further tick starts; a tick already
    /// running finishes first.
    pub fn start(self: Arc<Self>) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let period = self.config.interval();

        info!(
            interval_secs = self.config.interval_seconds,
            max_concurrency = self.config.max_concurrency,
            "Status scheduler started"
        );

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown_rx.recv() => {
                        info!("Status scheduler shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if !matches!(shutdown_rx.try_recv(), Err(TryRecvError::Empty)) {
                            info!("Status scheduler shutting down");
                            break;
                        }
                        match self.tick().await {
                            Ok(report) => info!(
                                evaluated = report.evaluated,
                                mutated = report.mutated,
                                failed = report.failed,
                                "Status tick complete"
                            ),
                            Err(e) => error!(error = %e, "Status tick failed"),
                        }
                    }
                }
            }
        });

        SchedulerHandle { shutdown_tx, task }
    }

    async fn run_tick(&self) -> Result<TickReport> {
        let now = self.clock.now();
        let window = DayWindow::containing(now);
        let query = FlightQuery::new(
            FlightFilter::all()
                .departing_from(window.start)
                .departing_before(window.end)
                .non_terminal(),
        );

        let flights = self.store.find(&query).await?;
        let mut report = TickReport {
            evaluated: flights.len(),
            ..TickReport::default()
        };
        debug!(candidates = report.evaluated, now = %now, "Evaluating flights");

        let outcomes: Vec<Outcome> = stream::iter(flights)
            .map(|flight| self.advance(flight, now))
            .buffer_unordered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                Outcome::Unchanged => {}
                Outcome::Mutated => report.mutated += 1,
                Outcome::Failed => report.failed += 1,
            }
        }

        if report.failed > 0 {
            warn!(failed = report.failed, "Some status changes were not persisted");
        }

        Ok(report)
    }

    async fn advance(&self, mut flight: Flight, now: DateTime<Utc>) -> Outcome {
        let Some(transition) = self
            .engine
            .evaluate(&mut flight, now, self.forecasts.as_ref())
            .await
        else {
            return Outcome::Unchanged;
        };

        match self.store.save(&flight).await {
            Ok(()) => {
                debug!(
                    flight = %flight.flight_number,
                    from = %transition.from,
                    to = %transition.to,
                    "Flight status updated"
                );
                Outcome::Mutated
            }
            Err(e) => {
                warn!(
                    flight = %flight.flight_number,
                    id = %flight.id,
                    error = %e,
                    "Failed to persist status change"
                );
                Outcome::Failed
            }
        }
    }
}
