//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the recency list and TTL
//! expiration. The store is single-threaded; [`Cache`](super::Cache) adds the
//! locking.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tokio::time::Instant;
use tracing::trace;

use crate::cache::{CacheEntry, NodeId, PutOption, RecencyList};
use crate::config::{Config, RepeatPut};
use crate::models::{EntryView, Snapshot};

// == Cache Store ==
/// Fixed-capacity LRU storage with optional per-entry deadlines.
///
/// Every key in `index` addresses exactly one live node in `list`, and every
/// live node is indexed by its own key.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to node lookup
    index: HashMap<K, NodeId>,
    /// Recency ordering, most recently used first
    list: RecencyList<K, V>,
    /// Maximum number of entries allowed, at least 1
    capacity: usize,
    /// What a repeat `put` does to the stored value
    repeat_put: RepeatPut,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store. A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            index: HashMap::with_capacity(capacity),
            list: RecencyList::with_capacity(capacity),
            capacity,
            repeat_put: RepeatPut::default(),
        }
    }

    /// Creates an empty store from the capacity and repeat-put policy of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacity).with_repeat_put(config.repeat_put)
    }

    /// Sets the repeat-put policy.
    pub fn with_repeat_put(mut self, repeat_put: RepeatPut) -> Self {
        self.repeat_put = repeat_put;
        self
    }

    // == Put ==
    /// Inserts a new entry or promotes an existing one.
    ///
    /// A new key evicts the least recently used entry when the store is full.
    /// A repeat key moves to the front and, under [`RepeatPut::Overwrite`],
    /// takes the new value. `opts` are applied afterwards on both paths.
    pub fn put(&mut self, key: K, value: V, opts: &[PutOption], now: Instant) {
        let id = match self.index.get(&key) {
            Some(&id) => {
                self.list.move_to_front(id);
                if self.repeat_put == RepeatPut::Overwrite {
                    if let Some(entry) = self.list.get_mut(id) {
                        entry.value = value;
                    }
                }
                trace!(policy = %self.repeat_put, "promoted repeat key");
                id
            }
            None => {
                if self.list.len() >= self.capacity {
                    self.evict_lru();
                }
                let id = self.list.push_front(CacheEntry::new(key.clone(), value));
                self.index.insert(key, id);
                id
            }
        };

        if let Some(entry) = self.list.get_mut(id) {
            for opt in opts {
                opt.apply(entry, now);
            }
        }
    }

    // == Get ==
    /// Returns the value for `key` if it is present and not expired.
    ///
    /// Does not change the recency order.
    pub fn get<Q>(&self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.list
            .get(id)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.value)
    }

    /// Like [`CacheStore::get`], but a hit also moves the entry to the front.
    ///
    /// Expired entries are neither returned nor promoted.
    pub fn get_promote<Q>(&mut self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        if self.list.get(id)?.is_expired_at(now) {
            return None;
        }
        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns true if `key` is present and not expired.
    pub fn contains_key<Q>(&self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key, now).is_some()
    }

    // == Remove ==
    /// Removes an entry by key, returning its value even if it had expired.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }

    // == Sweep Expired ==
    /// Removes every entry whose deadline has passed as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<NodeId> = self
            .list
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(id, _)| id)
            .collect();

        let count = expired.len();
        for id in expired {
            if let Some(entry) = self.list.remove(id) {
                self.index.remove(&entry.key);
            }
        }
        count
    }

    // == Evict ==
    /// Drops the least recently used entry from both list and index.
    fn evict_lru(&mut self) -> Option<V> {
        let id = self.list.back()?;
        let entry = self.list.remove(id)?;
        self.index.remove(&entry.key);
        trace!(capacity = self.capacity, "evicted least recently used entry");
        Some(entry.value)
    }

    // == Length ==
    /// Returns the number of entries, counting expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most recently used to least recently used.
    pub fn keys_most_recent_first(&self) -> Vec<K> {
        self.list.iter().map(|(_, entry)| entry.key.clone()).collect()
    }

    // == Snapshot ==
    /// Copies the recency ordering in both directions.
    pub fn snapshot(&self, now: Instant) -> Snapshot<K, V>
    where
        V: Clone,
    {
        let view = |entry: &CacheEntry<K, V>| {
            EntryView::new(
                entry.key.clone(),
                entry.value.clone(),
                entry
                    .ttl_remaining(now)
                    .map(|ttl| u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)),
            )
        };
        Snapshot::new(
            self.list.iter().map(|(_, entry)| view(entry)).collect(),
            self.list.iter_rev().map(|(_, entry)| view(entry)).collect(),
            self.capacity,
        )
    }

    /// Panics if the index and the list have drifted apart.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.list.check_invariants();
        assert!(self.len() <= self.capacity, "len exceeds capacity");
        assert_eq!(self.index.len(), self.list.len(), "index and list sizes differ");
        for (id, entry) in self.list.iter() {
            assert_eq!(
                self.index.get(&entry.key),
                Some(&id),
                "list node is not indexed under its key"
            );
        }
    }
}
