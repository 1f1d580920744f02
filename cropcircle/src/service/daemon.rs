//! Background loop that keeps published estimates fresh.
//!
//! Windows drift with time even when no new sightings arrive, so the
//! daemon reruns [`Recalculator::run_pass`] on a fixed interval:
//!
//! 1. The first pass runs immediately
//! 2. Later passes follow every `interval`; ticks missed while a pass
//!    overran are skipped rather than bunched up
//! 3. A failed pass is logged and retried on the next tick
//! 4. Cancellation stops the loop between passes
//!
//! # Example
//!
//! ```ignore
//! let daemon = RecalculationDaemon::new(Arc::new(recalculator));
//! tokio::spawn(daemon.run(shutdown_token));
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::recalculator::Recalculator;
use crate::config::DEFAULT_RECALCULATE_INTERVAL_SECS;

/// Default time between passes.
pub const DEFAULT_RECALCULATE_INTERVAL: Duration =
    Duration::from_secs(DEFAULT_RECALCULATE_INTERVAL_SECS);

/// Counters returned when the daemon stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaemonSummary {
    /// Passes that completed successfully.
    pub passes: u64,
    /// Passes that returned an error or panicked.
    pub failures: u64,
}

/// Runs recalculation passes until cancelled.
pub struct RecalculationDaemon {
    recalculator: Arc<Recalculator>,
    interval: Duration,
}

impl RecalculationDaemon {
    pub fn new(recalculator: Arc<Recalculator>) -> Self {
        Self {
            recalculator,
            interval: DEFAULT_RECALCULATE_INTERVAL,
        }
    }

    /// Sets a custom interval between passes.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs the loop until `shutdown` is cancelled.
    ///
    /// Passes run on the blocking pool since reconciliation fans out over
    /// rayon. A pass in progress when shutdown is signalled is allowed to
    /// finish.
    pub async fn run(self, shutdown: CancellationToken) -> DaemonSummary {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Recalculation daemon starting"
        );

        let mut summary = DaemonSummary::default();
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!(
                        passes = summary.passes,
                        failures = summary.failures,
                        "Recalculation daemon shutting down"
                    );
                    break;
                }

                _ = interval.tick() => {
                    let recalculator = Arc::clone(&self.recalculator);
                    match tokio::task::spawn_blocking(move || recalculator.run_pass()).await {
                        Ok(Ok(report)) => {
                            summary.passes += 1;
                            debug!("{}", report);
                        }
                        Ok(Err(e)) => {
                            summary.failures += 1;
                            warn!(error = %e, "Recalculation pass failed");
                        }
                        Err(e) => {
                            summary.failures += 1;
                            warn!(error = %e, "Recalculation pass panicked");
                        }
                    }
                }
            }
        }

        summary
    }
}
