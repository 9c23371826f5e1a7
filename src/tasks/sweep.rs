//! TTL Sweep Task
//!
//! One-shot background task that purges expired cache entries. `Cache::get`
//! launches one per read; it takes the write lock on its own, never while the
//! reader still holds the read lock on the same call stack.

use std::hash::Hash;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::cache::CacheStore;

/// Spawns a task that removes every expired entry from `store`, then exits.
///
/// # Returns
/// The task handle, resolving to the number of entries removed, or `None`
/// when the caller is not inside a tokio runtime and nothing was spawned.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::<u32, u32>::new(16)));
/// if let Some(handle) = spawn_sweep(store.clone()) {
///     let removed = handle.await?;
/// }
/// ```
pub fn spawn_sweep<K, V>(store: Arc<RwLock<CacheStore<K, V>>>) -> Option<JoinHandle<usize>>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    let runtime = Handle::try_current().ok()?;

    Some(runtime.spawn(async move {
        let removed = {
            let mut store_guard = store.write().await;
            store_guard.sweep_expired(Instant::now())
        };

        if removed > 0 {
            debug!("TTL sweep: removed {} expired entries", removed);
        } else {
            trace!("TTL sweep: no expired entries found");
        }
        removed
    }))
}
