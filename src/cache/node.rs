//! Recency list nodes, addressed by stable arena indices.

use crate::cache::CacheEntry;

/// Index of a node inside the [`RecencyList`](super::RecencyList) arena.
///
/// Ids stay valid until the node is removed; after that the slot may be
/// reused for a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    /// `None` for the two sentinels and for free slots
    pub(crate) entry: Option<CacheEntry<K, V>>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn sentinel() -> Self {
        Self {
            entry: None,
            prev: None,
            next: None,
        }
    }

    pub(crate) fn detached(entry: CacheEntry<K, V>) -> Self {
        Self {
            entry: Some(entry),
            prev: None,
            next: None,
        }
    }

    pub(crate) fn is_linked(&self) -> bool {
        self.prev.is_some() || self.next.is_some()
    }
}
