//! Recency List Module
//!
//! Doubly linked list of cache entries ordered from most recently used (front)
//! to least recently used (back).
//!
//! Nodes live in a `Vec` arena and link to each other by [`NodeId`], so
//! splicing is O(1) without raw pointers. Two sentinel slots bound the list:
//!
//! ```text
//!   HEAD <-> [mru] <-> ... <-> [lru] <-> TAIL
//! ```
//!
//! Removed slots go onto a free list and are reused by later inserts.

use crate::cache::node::{Node, NodeId};
use crate::cache::CacheEntry;

const HEAD: NodeId = NodeId(0);
const TAIL: NodeId = NodeId(1);

// == Recency List ==
#[derive(Debug)]
pub struct RecencyList<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list holding only the two linked sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node::sentinel());
        nodes.push(Node::sentinel());
        nodes[HEAD.0].next = Some(TAIL);
        nodes[TAIL.0].prev = Some(HEAD);
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Stores `entry` in a free slot and links it as most recently used.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) -> NodeId {
        let id = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Node::detached(entry);
                NodeId(idx)
            }
            None => {
                self.nodes.push(Node::detached(entry));
                NodeId(self.nodes.len() - 1)
            }
        };
        self.link_at_head(id);
        self.len += 1;
        id
    }

    // == Link At Head ==
    /// Links a detached node directly after the head sentinel.
    pub(crate) fn link_at_head(&mut self, id: NodeId) {
        debug_assert!(!self.is_sentinel(id), "sentinels are never relinked");
        debug_assert!(!self.nodes[id.0].is_linked(), "node is already linked");

        let first = self.nodes[HEAD.0].next.unwrap_or(TAIL);
        self.nodes[id.0].prev = Some(HEAD);
        self.nodes[id.0].next = Some(first);
        self.nodes[first.0].prev = Some(id);
        self.nodes[HEAD.0].next = Some(id);
    }

    // == Unlink ==
    /// Splices a node out of the list and clears its links.
    ///
    /// The slot and its entry stay allocated; call [`RecencyList::remove`] to
    /// free them.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        if self.is_sentinel(id) {
            return;
        }
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        let (Some(prev), Some(next)) = (node.prev.take(), node.next.take()) else {
            return;
        };
        self.nodes[prev.0].next = Some(next);
        self.nodes[next.0].prev = Some(prev);
    }

    // == Move To Front ==
    /// Promotes a live node to the most recently used position.
    pub fn move_to_front(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        self.unlink(id);
        self.link_at_head(id);
    }

    // == Remove ==
    /// Unlinks a node, frees its slot and returns the entry it held.
    pub fn remove(&mut self, id: NodeId) -> Option<CacheEntry<K, V>> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id);
        let entry = self.nodes[id.0].entry.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(entry)
    }

    // == Back ==
    /// Returns the least recently used node, the one just before the tail sentinel.
    pub fn back(&self) -> Option<NodeId> {
        self.nodes[TAIL.0].prev.filter(|&id| id != HEAD)
    }

    /// Returns the most recently used node, the one just after the head sentinel.
    pub fn front(&self) -> Option<NodeId> {
        self.nodes[HEAD.0].next.filter(|&id| id != TAIL)
    }

    pub fn get(&self, id: NodeId) -> Option<&CacheEntry<K, V>> {
        self.nodes.get(id.0).and_then(|node| node.entry.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut CacheEntry<K, V>> {
        self.nodes.get_mut(id.0).and_then(|node| node.entry.as_mut())
    }

    /// Returns `true` if `id` addresses a live (non-sentinel, non-free) node.
    pub fn contains(&self, id: NodeId) -> bool {
        !self.is_sentinel(id) && self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates from most recently used to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.nodes[HEAD.0].next,
            end: TAIL,
            forward: true,
        }
    }

    /// Iterates from least recently used to most recently used.
    pub fn iter_rev(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            current: self.nodes[TAIL.0].prev,
            end: HEAD,
            forward: false,
        }
    }

    fn is_sentinel(&self, id: NodeId) -> bool {
        id == HEAD || id == TAIL
    }

    /// Walks the list both ways and panics if the links disagree with `len`.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let forward: Vec<NodeId> = self.iter().map(|(id, _)| id).collect();
        let mut backward: Vec<NodeId> = self.iter_rev().map(|(id, _)| id).collect();
        backward.reverse();

        assert_eq!(forward.len(), self.len, "forward walk length mismatch");
        assert_eq!(forward, backward, "forward and backward walks disagree");
        assert_eq!(
            self.nodes.len() - 2 - self.free.len(),
            self.len,
            "arena slots out of sync with len"
        );
        for &idx in &self.free {
            let node = &self.nodes[idx];
            assert!(node.entry.is_none() && !node.is_linked(), "free slot {} in use", idx);
        }
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Iterator over `(NodeId, &CacheEntry)` pairs in recency order.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    current: Option<NodeId>,
    end: NodeId,
    forward: bool,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (NodeId, &'a CacheEntry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current.filter(|&id| id != self.end)?;
        let list = self.list;
        let node = &list.nodes[id.0];
        self.current = if self.forward { node.next } else { node.prev };
        node.entry.as_ref().map(|entry| (id, entry))
    }
}
