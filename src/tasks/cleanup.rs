//! Expired Entry Sweep
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::preload::SharedCache;

/// Spawns a background task that calls `clear_expired` on the cache every
/// `cleanup_interval_secs` seconds.
///
/// Lookups already drop expired entries lazily, so the sweep only bounds how
/// long unread expired entries keep holding capacity.
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(ResourceCache::default()));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired entry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.clear_expired()
            };

            if removed > 0 {
                info!("Expired entry sweep: removed {} entries", removed);
            } else {
                debug!("Expired entry sweep: no expired entries found");
            }
        }
    })
}
