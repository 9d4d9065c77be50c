//! Expiry Sweep Task
//!
//! Optional background task that periodically reaps expired cache entries.
//! Expiry is lazy without it; the sweep only bounds how long expired entries
//! keep occupying slots that no lookup touches.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that reaps expired entries every `interval`.
///
/// Each sweep runs under the cache's exclusive lock like any other
/// operation. The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = SharedCache::with_capacity(1000);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    // tokio intervals must be non-zero
    let interval = interval.max(Duration::from_millis(1));

    tokio::spawn(async move {
        info!("Starting expiry sweep with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
