//! Sentinel-bounded doubly linked list backed by a [`SlotArena`].
//!
//! Nodes live in a `SlotArena` and link to each other by [`SlotId`]. Two
//! sentinel nodes, allocated at construction and never removed, bound the
//! sequence so every live node always has a predecessor and a successor:
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ 0 HEAD │ { value: None,    prev: HEAD, next: id_2 }   │
//!   │ 1 TAIL │ { value: None,    prev: id_3, next: TAIL }   │
//!   │ id_2   │ { value: Some(A), prev: HEAD, next: id_3 }   │
//!   │ id_3   │ { value: Some(B), prev: id_2, next: TAIL }   │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   HEAD ─► [A] ◄──► [B] ◄── TAIL
//!           LRU      MRU
//! ```
//!
//! The front (next to `HEAD`) is the least recently used node and the back
//! (next to `TAIL`) the most recently used one. Sentinel ids are never
//! returned to callers and every public operation rejects them.
//!
//! ## Performance
//! - `push_back` / `pop_front` / `move_to_back` / `remove`: O(1)
//! - `iter`: O(n), front to back

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

const HEAD: SlotId = SlotId(0);
const TAIL: SlotId = SlotId(1);

#[derive(Debug)]
struct Node<T> {
    value: Option<T>,
    prev: SlotId,
    next: SlotId,
}

/// Recency-ordered list: front = least recent, back = most recent.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list holding only the two sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` live nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut list = Self {
            arena: SlotArena::with_capacity(capacity.saturating_add(2)),
        };
        list.install_sentinels();
        list
    }

    fn install_sentinels(&mut self) {
        let head = self.arena.insert(Node {
            value: None,
            prev: HEAD,
            next: TAIL,
        });
        let tail = self.arena.insert(Node {
            value: None,
            prev: HEAD,
            next: TAIL,
        });
        debug_assert_eq!((head, tail), (HEAD, TAIL));
    }

    #[inline]
    fn is_sentinel(id: SlotId) -> bool {
        id == HEAD || id == TAIL
    }

    /// Number of live (non-sentinel) nodes.
    pub fn len(&self) -> usize {
        self.arena.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` names a live node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        !Self::is_sentinel(id) && self.arena.contains(id)
    }

    /// Id of the least recently used node.
    pub fn front_id(&self) -> Option<SlotId> {
        self.arena
            .get(HEAD)
            .map(|head| head.next)
            .filter(|&id| id != TAIL)
    }

    /// Id of the most recently used node.
    pub fn back_id(&self) -> Option<SlotId> {
        self.arena
            .get(TAIL)
            .map(|tail| tail.prev)
            .filter(|&id| id != HEAD)
    }

    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.get(id))
    }

    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(|node| node.value.as_mut())
    }

    /// Appends `value` next to the tail sentinel and returns its id.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value: Some(value),
            prev: HEAD,
            next: TAIL,
        });
        let linked = self.link_before_tail(id);
        debug_assert!(linked.is_some());
        id
    }

    /// Unlinks and returns the least recently used value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front_id()?;
        self.remove(id)
    }

    /// Unlinks node `id`, frees its slot and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id)?;
        self.arena.remove(id).and_then(|node| node.value)
    }

    /// Relinks node `id` next to the tail sentinel; `false` if `id` is not live.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.back_id() == Some(id) {
            return true;
        }
        self.unlink(id).and_then(|_| self.link_before_tail(id)).is_some()
    }

    /// Drops every live node and restores the empty sentinel pair.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.install_sentinels();
    }

    /// Iterates values from least to most recently used.
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.front_id(),
        }
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };
        self.arena.get_mut(prev)?.next = next;
        self.arena.get_mut(next)?.prev = prev;
        Some(())
    }

    fn link_before_tail(&mut self, id: SlotId) -> Option<()> {
        let last = self.arena.get(TAIL)?.prev;
        {
            let node = self.arena.get_mut(id)?;
            node.prev = last;
            node.next = TAIL;
        }
        self.arena.get_mut(last)?.next = id;
        self.arena.get_mut(TAIL)?.prev = id;
        Some(())
    }

    /// Walks the list from the head sentinel and checks link symmetry and length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let head = self
            .arena
            .get(HEAD)
            .ok_or_else(|| InvariantError::new("head sentinel missing"))?;
        if self.arena.get(TAIL).is_none() {
            return Err(InvariantError::new("tail sentinel missing"));
        }

        let mut count = 0usize;
        let mut prev = HEAD;
        let mut current = head.next;
        while current != TAIL {
            let node = self
                .arena
                .get(current)
                .ok_or_else(|| InvariantError::new("dangling next link"))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node {} has prev {} but was reached from {}",
                    current.index(),
                    node.prev.index(),
                    prev.index()
                )));
            }
            if node.value.is_none() {
                return Err(InvariantError::new("sentinel reachable inside the list"));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = current;
            current = node.next;
        }

        let tail_prev = self.arena.get(TAIL).map(|tail| tail.prev);
        if tail_prev != Some(prev) {
            return Err(InvariantError::new("tail sentinel does not point at last node"));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {count} nodes but arena holds {}",
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values from least to most recently used.
pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = Some(node.next).filter(|&next| next != TAIL);
        node.value.as_ref()
    }
}
