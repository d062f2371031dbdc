//! Expiration Sweep Task
//!
//! Background task that periodically removes expired entries from a [`MemoryStore`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns the expiration sweep for `store`.
///
/// Reads already drop expired entries lazily; the sweep reclaims memory for
/// keys nobody reads again. The task runs until `shutdown` is cancelled or
/// the handle is aborted.
///
/// # Arguments
/// * `store` - shared reference to the store
/// * `cleanup_interval_secs` - seconds between sweeps, at least 1
/// * `shutdown` - stops the task once cancelled
pub fn spawn_cleanup_task(
    store: Arc<MemoryStore>,
    cleanup_interval_secs: u64,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    let period = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!("Expiration sweep every {}s", period.as_secs());
        let mut ticker = tokio::time::interval(period);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Expiration sweep stopped");
                    return;
                }
                _ = ticker.tick() => {}
            }

            match store.cleanup_expired() {
                0 => debug!("Sweep found nothing to expire ({} live entries)", store.len()),
                removed => info!(
                    "Sweep expired {} entries ({} live entries)",
                    removed,
                    store.len()
                ),
            }
        }
    })
}
