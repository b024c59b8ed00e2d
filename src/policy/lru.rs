//! # Least Recently Used (LRU) Cache Implementation
//!
//! Exact LRU: a hash index for O(1) lookup plus a sentinel-bounded recency
//! list for O(1) promotion and eviction. This is the engine the LRU-K and
//! sharded caches are built from.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                                 │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │                    Mutex<LruCore<K, V>>                            │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                  │                                       │
//!   │                                  ▼                                       │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<K, SlotId>  (key index)                                 │ │
//!   │   │                                                                    │ │
//!   │   │   key_1 ──────────────┐       key_2 ─────────┐                     │ │
//!   │   │                       ▼                      ▼                     │ │
//!   │   │  RecencyList<Entry<K, V>>                                          │ │
//!   │   │                                                                    │ │
//!   │   │  HEAD ──► ┌──────────┐ ◄──► ┌──────────┐ ◄──► ┌──────────┐ ◄── TAIL │ │
//!   │   │           │ key_1    │      │ key_2    │      │ key_3    │          │ │
//!   │   │           │ value    │      │ value    │      │ value    │          │ │
//!   │   │           │ count    │      │ count    │      │ count    │          │ │
//!   │   │           └──────────┘      └──────────┘      └──────────┘          │ │
//!   │   │  Least Recently Used ─────────────────────► Most Recently Used     │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LRU Operations Flow
//!
//! ```text
//!   INSERT new item (cache full, capacity = 3)
//!   ═══════════════════════════════════════════════════════════════════════════
//!
//!     HEAD ──► [A] ◄──► [B] ◄──► [C] ◄── TAIL
//!
//!   insert(D):
//!     1. Evict [A], the neighbour of HEAD, from list and index
//!     2. Link [D] next to TAIL and register it in the index
//!
//!     HEAD ──► [B] ◄──► [C] ◄──► [D] ◄── TAIL
//!
//!   ACCESS existing item
//!   ═══════════════════════════════════════════════════════════════════════════
//!
//!   get(B):
//!     1. Find [B] in the index: O(1)
//!     2. Unlink [B] and relink it next to TAIL: O(1)
//!
//!     HEAD ──► [C] ◄──► [D] ◄──► [B] ◄── TAIL
//! ```
//!
//! ## Key Components
//!
//! | Component        | Description                                          |
//! |------------------|------------------------------------------------------|
//! | `LruCore<K, V>`  | Single-threaded engine: index + recency list         |
//! | `LruCache<K, V>` | `parking_lot::Mutex` wrapper implementing the policy |
//! | `Entry<K, V>`    | Key, value and per-entry access counter              |
//!
//! ## Access counter
//!
//! Every entry carries an access count that starts at 1 and grows on each
//! touch (get hit, overwrite, `touch`). Eviction never reads it; it is exposed
//! through [`LruCore::access_count`] for callers that want it.
//!
//! ## Capacity 0
//!
//! A cache created with capacity 0 is inert for its whole lifetime: inserts
//! are ignored and every lookup misses. This is not an error.
//!
//! ## Concurrency Model
//!
//! Every `LruCache` operation takes the instance's single mutex, including
//! reads, since a hit reorders the list. The guard is released on every exit
//! path. Callers block until the lock is free; there is no timeout.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//! use lrukit::traits::CachePolicy;
//!
//! let cache = LruCache::new(2);
//! cache.put(1, "a");
//! cache.put(2, "b");
//! cache.get(&1);       // 1 becomes most recently used
//! cache.put(3, "c");   // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some("a"));
//! assert_eq!(cache.get(&3), Some("c"));
//! ```

use std::fmt;
use std::hash::Hash;
use std::mem;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::{RecencyList, SlotId};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{CachePolicy, ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};

// Larger capacities grow on demand.
const PREALLOC_LIMIT: usize = 4096;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    access_count: u64,
}

/// Single-threaded exact-LRU engine.
///
/// `index` and `order` are kept in bijection: every key in the index names
/// exactly one live node of the list and every live node is named by exactly
/// one key.
pub struct LruCore<K, V> {
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU core holding at most `capacity` entries.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache: LruCore<u32, &str> = LruCore::new(0);
    /// cache.insert(1, "a");
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            debug!("lru cache created with zero capacity; inserts will be ignored");
        }
        let prealloc = capacity.min(PREALLOC_LIMIT);
        Self {
            index: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            order: RecencyList::with_capacity(prealloc),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    #[inline]
    fn touch_slot(&mut self, id: SlotId) {
        if let Some(entry) = self.order.get_mut(id) {
            entry.access_count += 1;
        }
        self.order.move_to_back(id);
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_front()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Mutable lookup; counts as a touch.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.touch_slot(id);
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Number of touches recorded for `key` since it was inserted.
    pub fn access_count(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|entry| entry.access_count)
    }

    /// Iterates keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Audits the index/list bijection and the capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_invariants()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} live entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} is indexed under a different key",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at vacant slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self.order.get_mut(id).map(|entry| {
                entry.access_count += 1;
                mem::replace(&mut entry.value, value)
            });
            self.order.move_to_back(id);
            return previous;
        }

        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity && self.evict_lru().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            trace!(
                capacity = self.capacity,
                len = self.index.len(),
                "evicted least recently used entry"
            );
        }

        let id = self.order.push_back(Entry {
            key: key.clone(),
            value,
            access_count: 1,
        });
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.touch_slot(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.order.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.evict_lru();

        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_lru_found();
        }

        popped
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.touch_slot(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        let from_lru = self.keys().position(|candidate| candidate == key)?;
        Some(self.len() - 1 - from_lru)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            clears: self.metrics.clears,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            cache_len: self.index.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU core with a capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe exact-LRU cache: one [`LruCore`] behind one mutex.
///
/// Every lookup reorders the recency list, so reads need exclusive access as
/// much as writes do; a plain mutex is used rather than a reader-writer lock.
pub struct LruCache<K, V> {
    inner: Mutex<LruCore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries; 0 makes it inert.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruCore::new(capacity)),
        }
    }

    /// Inserts or overwrites `key`. An overwrite counts as a touch.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().insert(key, value);
    }

    /// Like [`put`](Self::put) but hands back the replaced value.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Returns a clone of the value and marks `key` most recently used.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a clone of the value without touching recency order.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Overwrites `key` only if it is already present; `true` on overwrite.
    ///
    /// Presence check and overwrite happen under one lock acquisition.
    pub fn update(&self, key: &K, value: &V) -> bool
    where
        V: Clone,
    {
        match self.inner.lock().get_mut(key) {
            Some(slot) => {
                slot.clone_from(value);
                true
            },
            None => false,
        }
    }

    /// Computes the new value for `key` from its current one and stores it.
    ///
    /// Reading and writing happen under one lock acquisition. The write is an
    /// ordinary insert: it touches an existing entry or may evict the least
    /// recently used one.
    pub fn upsert_with<F>(&self, key: K, f: F) -> V
    where
        V: Clone,
        F: FnOnce(Option<&V>) -> V,
    {
        let mut core = self.inner.lock();
        let next = f(core.peek(&key));
        core.insert(key, next.clone());
        next
    }

    /// Deletes `key` from both index and list; no-op when absent.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Marks `key` most recently used; `false` if absent.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    pub fn access_count(&self, key: &K) -> Option<u64> {
        self.inner.lock().access_count(key)
    }

    /// Position of `key` in recency order, 0 being the most recently used.
    ///
    /// O(n): walks the recency list while holding the lock.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.inner.lock().recency_rank(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    /// Clones the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .lock()
            .peek_lru()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Snapshot of the keys from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys().cloned().collect()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CachePolicy<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn policy_name(&self) -> &'static str {
        "lru"
    }
}

impl<K: Send, V: Send> ConcurrentCache for LruCache<K, V> {}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("LruCache")
            .field("len", &core.len())
            .field("capacity", &core.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with a capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}
