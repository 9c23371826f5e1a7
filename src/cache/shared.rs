//! Shared Cache Module
//!
//! Thread-safe handle over a [`CacheStore`], guarded by one reader/writer lock.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheStore, PutOption};
use crate::config::Config;
use crate::models::Snapshot;
use crate::tasks::spawn_sweep;

/// Cloneable, thread-safe LRU cache with lazy TTL expiration.
///
/// `put`, `remove` and sweeps take the write lock; `get` takes the read lock
/// unless read promotion is enabled. Clones share the same entries.
///
/// # Example
/// ```ignore
/// let cache: Cache<u32, &str> = Cache::new(2);
/// cache.put(1, "a").await;
/// cache.put_with(2, "b", &[with_expire_secs(60)]).await;
/// assert_eq!(cache.get(&1).await, Some("a"));
/// ```
pub struct Cache<K, V> {
    store: Arc<RwLock<CacheStore<K, V>>>,
    capacity: usize,
    promote_on_get: bool,
    sweep_on_get: bool,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Creates a cache holding at most `capacity` entries (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        Self::from_config(&Config::with_capacity(capacity))
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        let store = CacheStore::from_config(config);
        Self {
            capacity: store.capacity(),
            store: Arc::new(RwLock::new(store)),
            promote_on_get: config.promote_on_get,
            sweep_on_get: config.sweep_on_get,
        }
    }

    // == Put ==
    /// Inserts or promotes `key` with no options.
    pub async fn put(&self, key: K, value: V) {
        self.put_with(key, value, &[]).await;
    }

    /// Inserts or promotes `key`, then applies `opts` to its entry.
    pub async fn put_with(&self, key: K, value: V, opts: &[PutOption]) {
        let mut store = self.store.write().await;
        store.put(key, value, opts, Instant::now());
    }

    // == Get ==
    /// Returns a clone of the value for `key` if present and not expired.
    ///
    /// Every call also launches a background sweep of expired entries. The
    /// sweep runs after this read has released its lock and is not awaited.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let now = Instant::now();
        let value = if self.promote_on_get {
            let mut store = self.store.write().await;
            store.get_promote(key, now).cloned()
        } else {
            let store = self.store.read().await;
            store.get(key, now).cloned()
        };

        if self.sweep_on_get && spawn_sweep(self.store.clone()).is_none() {
            let removed = self.sweep_expired().await;
            debug!("TTL sweep ran inline outside a tokio runtime: removed {} entries", removed);
        }
        value
    }

    // == Remove ==
    /// Removes `key`, returning its value even if it had expired.
    pub async fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.write().await.remove(key)
    }

    /// Removes every expired entry now and returns how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut store = self.store.write().await;
        store.sweep_expired(Instant::now())
    }

    // == Inspect ==
    /// Returns the full recency ordering in both directions.
    pub async fn inspect(&self) -> Snapshot<K, V>
    where
        V: Clone,
    {
        self.store.read().await.snapshot(Instant::now())
    }

    /// Number of entries held, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            capacity: self.capacity,
            promote_on_get: self.promote_on_get,
            sweep_on_get: self.sweep_on_get,
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("capacity", &self.capacity)
            .field("promote_on_get", &self.promote_on_get)
            .field("sweep_on_get", &self.sweep_on_get)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{with_expire, with_expire_secs};
    use crate::config::RepeatPut;
    use chrono::TimeDelta;
    use std::time::Duration;

    /// Yields until the background sweep has brought the cache down to `expected`.
    async fn wait_for_len<K, V>(cache: &Cache<K, V>, expected: usize) -> usize
    where
        K: Hash + Eq + Clone + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        for _ in 0..100 {
            if cache.len().await == expected {
                break;
            }
            tokio::task::yield_now().await;
        }
        cache.len().await
    }

    #[tokio::test]
    async fn test_cache_put_and_get() {
        let cache: Cache<&str, &str> = Cache::new(10);
        cache.put("key1", "value1").await;

        assert_eq!(cache.get("key1").await, Some("value1"));
        assert_eq!(cache.get("missing").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_zero_capacity_clamped() {
        let cache: Cache<u32, u32> = Cache::new(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[tokio::test]
    async fn test_cache_zero_ttl_hidden_then_swept() {
        let cache: Cache<u32, &str> = Cache::new(10);
        cache.put_with(1, "a", &[with_expire_secs(0)]).await;
        cache.put(2, "b").await;

        assert_eq!(cache.get(&1).await, None);
        assert_eq!(wait_for_len(&cache, 1).await, 1);
        assert_eq!(cache.get(&2).await, Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_ttl_expires_with_time() {
        let cache: Cache<u32, &str> = Cache::new(10);
        cache.put_with(1, "a", &[with_expire(TimeDelta::hours(1))]).await;

        assert_eq!(cache.get(&1).await, Some("a"));
        tokio::time::advance(Duration::from_secs(3600)).await;
        assert_eq!(cache.get(&1).await, None);
    }

    #[tokio::test]
    async fn test_cache_sweep_disabled_keeps_expired_entries() {
        let config = Config {
            capacity: 4,
            sweep_on_get: false,
            ..Config::default()
        };
        let cache: Cache<u32, &str> = Cache::from_config(&config);
        cache.put_with(1, "a", &[with_expire_secs(0)]).await;

        assert_eq!(cache.get(&1).await, None);
        tokio::task::yield_now().await;
        assert_eq!(cache.len().await, 1);

        assert_eq!(cache.sweep_expired().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_promote_on_get() {
        let config = Config {
            capacity: 2,
            promote_on_get: true,
            ..Config::default()
        };
        let cache: Cache<u32, &str> = Cache::from_config(&config);
        cache.put(1, "a").await;
        cache.put(2, "b").await;

        assert_eq!(cache.get(&1).await, Some("a"));
        cache.put(3, "c").await;

        assert_eq!(cache.get(&1).await, Some("a"));
        assert_eq!(cache.get(&2).await, None);
    }

    #[tokio::test]
    async fn test_cache_promote_only_policy() {
        let config = Config {
            capacity: 2,
            repeat_put: RepeatPut::PromoteOnly,
            ..Config::default()
        };
        let cache: Cache<u32, &str> = Cache::from_config(&config);
        cache.put(1, "a").await;
        cache.put(1, "a2").await;

        assert_eq!(cache.get(&1).await, Some("a"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_remove() {
        let cache: Cache<u32, &str> = Cache::new(4);
        cache.put(1, "a").await;

        assert_eq!(cache.remove(&1).await, Some("a"));
        assert_eq!(cache.remove(&1).await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_inspect_orders() {
        let cache: Cache<u32, &str> = Cache::new(3);
        cache.put(1, "a").await;
        cache.put(2, "b").await;
        cache.put(3, "c").await;
        cache.put(1, "a").await;

        let snapshot = cache.inspect().await;
        let forward: Vec<u32> = snapshot.keys().copied().collect();
        let backward: Vec<u32> = snapshot.least_recent_first.iter().map(|v| v.key).collect();

        assert_eq!(forward, vec![1, 3, 2]);
        assert_eq!(backward, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_cache_clones_share_entries() {
        let cache: Cache<u32, &str> = Cache::new(4);
        let other = cache.clone();
        other.put(9, "nine").await;

        assert_eq!(cache.get(&9).await, Some("nine"));
        assert!(format!("{:?}", cache).contains("capacity: 4"));
    }

    #[test]
    fn test_cache_get_outside_runtime_sweeps_inline() {
        let cache: Cache<u32, &str> = Cache::new(4);
        futures::executor::block_on(async {
            cache.put_with(1, "stale", &[with_expire_secs(0)]).await;
            cache.put(2, "fresh").await;
            assert_eq!(cache.len().await, 2);

            assert_eq!(cache.get(&2).await, Some("fresh"));

            // No runtime to spawn on, so the sweep finished before `get` returned
            assert_eq!(cache.len().await, 1);
            assert_eq!(cache.get(&1).await, None);
        });
    }
}
