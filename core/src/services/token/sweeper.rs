//! Background task that sweeps the revocation registry on a fixed interval.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::registry::RevocationRegistry;

/// Starts the periodic revocation sweep
pub struct RevocationSweeper;

impl RevocationSweeper {
    /// Spawn the sweep loop on the current tokio runtime.
    ///
    /// The first sweep runs one `interval` after start.
    pub fn start(registry: Arc<RevocationRegistry>, interval: Duration) -> SweeperHandle {
        let interval = interval.max(Duration::from_millis(1));
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!("Revocation sweeper started, interval {:?}", interval);

            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let result = registry.sweep();
                        debug!(
                            removed = result.removed,
                            remaining = result.remaining,
                            "Revocation sweep tick"
                        );
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Revocation sweeper stopped");
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle owning the sweep task
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal the loop to stop and wait for it
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("Revocation sweeper ended abnormally: {}", e);
        }
    }
}
