use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use bizworx_core::config::SchedulerConfig;
use bizworx_store::JobStore;

use crate::sweep::run_sweep;

/// Owns the periodic rescheduling loop.
///
/// Constructed and started explicitly by the host process; there is no
/// global singleton. The loop is cancelled through the `watch` channel
/// passed to [`run`](Self::run), so shutdown and tests stay clean.
pub struct SchedulerEngine {
    store: Arc<JobStore>,
    config: SchedulerConfig,
}

impl SchedulerEngine {
    pub fn new(store: Arc<JobStore>, config: SchedulerConfig) -> Self {
        Self { store, config }
    }

    /// Main loop. Sweeps once immediately, then on every interval tick,
    /// until `shutdown` broadcasts `true`.
    ///
    /// A failed pass is logged and abandoned; already-applied updates stay
    /// in place and the timer keeps firing. There is no overlap guard
    /// between passes — a sweep is assumed to finish well within the
    /// interval (single engine instance per deployment).
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.config.sweep_interval_secs,
            "rescheduler engine started"
        );

        // The first tick of a tokio interval completes immediately, which
        // gives exactly the run-at-startup-then-every-interval cadence.
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(
            self.config.sweep_interval_secs.max(1),
        ));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = run_sweep(&self.store, &self.config) {
                        error!("reschedule sweep failed: {e}");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("rescheduler engine shutting down");
                        break;
                    }
                }
            }
        }
    }
}
