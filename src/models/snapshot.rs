//! Snapshot DTOs for cache inspection
//!
//! Defines the ordered, owned view of the recency list returned by `inspect`.

use serde::Serialize;

/// One entry as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView<K, V> {
    /// The entry key
    pub key: K,
    /// The stored value
    pub value: V,
    /// Milliseconds before expiry, 0 once expired, None if the entry never expires
    pub ttl_remaining_ms: Option<u64>,
}

impl<K, V> EntryView<K, V> {
    /// Creates a new EntryView
    pub fn new(key: K, value: V, ttl_remaining_ms: Option<u64>) -> Self {
        Self {
            key,
            value,
            ttl_remaining_ms,
        }
    }

    /// Returns true if the entry's deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.ttl_remaining_ms == Some(0)
    }
}

/// Full recency ordering of the cache at one point in time.
///
/// Expired entries that no sweep has purged yet are still listed.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<K, V> {
    /// Entries from most recently used to least recently used
    pub most_recent_first: Vec<EntryView<K, V>>,
    /// Entries from least recently used to most recently used
    pub least_recent_first: Vec<EntryView<K, V>>,
    /// Capacity of the cache the snapshot was taken from
    pub capacity: usize,
    /// Timestamp in ISO 8601 format
    pub taken_at: String,
}

impl<K, V> Snapshot<K, V> {
    /// Creates a new Snapshot stamped with the current time
    pub fn new(
        most_recent_first: Vec<EntryView<K, V>>,
        least_recent_first: Vec<EntryView<K, V>>,
        capacity: usize,
    ) -> Self {
        Self {
            most_recent_first,
            least_recent_first,
            capacity,
            taken_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.most_recent_first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.most_recent_first.is_empty()
    }

    /// Keys from most recently used to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.most_recent_first.iter().map(|view| &view.key)
    }

    /// `(key, value)` pairs from most recently used to least recently used.
    pub fn pairs(&self) -> impl Iterator<Item = (&K, &V)> {
        self.most_recent_first
            .iter()
            .map(|view| (&view.key, &view.value))
    }
}
