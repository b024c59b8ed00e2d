//! # LRU-K Cache Implementation
//!
//! Delayed-admission LRU. A key must be seen `k` times (through `get` or
//! `put`) before its value is admitted into the bounded main store, which
//! keeps one-shot keys from a sequential scan from flushing the working set.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LruKCache<K, V>                                 │
//!   │                                                                          │
//!   │   ┌───────────────────────────────┐   ┌────────────────────────────────┐ │
//!   │   │  history: LruCache<K, usize>  │   │  main: LruCache<K, V>          │ │
//!   │   │                               │   │                                │ │
//!   │   │  key ──► access count         │   │  key ──► value                 │ │
//!   │   │  capacity: history_capacity   │   │  capacity: capacity            │ │
//!   │   └───────────────────────────────┘   └────────────────────────────────┘ │
//!   │                                                                          │
//!   │   k: accesses required for admission (>= 1)                              │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both stores are ordinary [`LruCache`]s with their own lock. The history
//! store is itself LRU-bounded, so counts of keys that stop being accessed are
//! eventually forgotten.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(key, value), k = 2
//!   ═══════════════════════════════════════════════════════════════════════════
//!
//!     key in main? ──yes──► overwrite in main
//!          │                    │
//!          no                   │
//!          ▼                    ▼
//!     history[key] += 1   (always, admitted or not)
//!          │
//!     count >= k? ──no──► key stays in history (value dropped if not admitted)
//!          │
//!          yes
//!          ▼
//!     remove key from history, put (key, value) into main
//!
//!   get(key)
//!   ═══════════════════════════════════════════════════════════════════════════
//!
//!     history[key] += 1   (always, hit or miss)
//!     return main.get(key)
//! ```
//!
//! A `get` never promotes on its own (it has no value to admit), but the
//! accesses it records count toward the next `put`.
//!
//! ## Consistency
//!
//! No lock spans both stores. A `get` that bumps the history count and then
//! reads the main store can interleave with a concurrent `put` of the same
//! key, so a reader may miss a key whose promotion is in flight, or a count
//! may be recorded against a key that was promoted an instant earlier. Each
//! store on its own stays consistent; callers needing a linearizable view
//! must serialise access themselves.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru_k::LruKCache;
//! use lrukit::traits::CachePolicy;
//!
//! let cache = LruKCache::new(2, 10, 2);
//!
//! cache.put(5, "x");
//! assert_eq!(cache.get(&5), None);   // one access recorded before this get
//!
//! cache.put(5, "x");                 // third access: admitted
//! assert_eq!(cache.get(&5), Some("x"));
//! assert_eq!(cache.len(), 1);
//! ```

use std::fmt;
use std::hash::Hash;

#[cfg(feature = "metrics")]
use parking_lot::Mutex;
use tracing::{debug, trace};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruKMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruKMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{LruKMetricsRecorder, MetricsSnapshotProvider};
use crate::policy::lru::LruCache;
use crate::traits::{CachePolicy, ConcurrentCache};

/// Delayed-admission cache built from two [`LruCache`] stores.
pub struct LruKCache<K, V> {
    main: LruCache<K, V>,
    history: LruCache<K, usize>,
    k: usize,
    #[cfg(feature = "metrics")]
    metrics: Mutex<LruKMetrics>,
}

impl<K, V> LruKCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache whose main store holds `capacity` values and whose
    /// history store tracks counts for `history_capacity` keys.
    ///
    /// A `k` of 0 is treated as 1, which admits on first sight and behaves
    /// like a plain LRU with extra bookkeeping.
    pub fn new(capacity: usize, history_capacity: usize, k: usize) -> Self {
        Self {
            main: LruCache::new(capacity),
            history: LruCache::new(history_capacity),
            k: k.max(1),
            #[cfg(feature = "metrics")]
            metrics: Mutex::new(LruKMetrics::default()),
        }
    }

    fn bump_history(&self, key: &K) -> usize {
        let count = self
            .history
            .upsert_with(key.clone(), |count| count.copied().unwrap_or(0) + 1);

        #[cfg(feature = "metrics")]
        self.metrics.lock().record_history_bump();

        trace!(count, k = self.k, "recorded access in history");
        count
    }

    /// Records an access and returns the value if `key` has been admitted.
    pub fn get(&self, key: &K) -> Option<V> {
        self.bump_history(key);
        self.main.get(key)
    }

    /// Overwrites `key` if it is admitted, then counts the access. Once the
    /// count reaches `k` the history record is purged and the value is put
    /// into the main store.
    ///
    /// Admitted keys are counted too; a put that brings their count to `k`
    /// purges the record again.
    pub fn put(&self, key: K, value: V) {
        let overwritten = self.main.update(&key, &value);

        #[cfg(feature = "metrics")]
        if overwritten {
            self.metrics.lock().record_main_overwrite();
        }

        let count = self.bump_history(&key);
        if count < self.k {
            #[cfg(feature = "metrics")]
            if !overwritten {
                self.metrics.lock().record_gated_put();
            }
            return;
        }

        self.history.remove(&key);
        self.main.put(key, value);

        if overwritten {
            trace!(count, k = self.k, "purged history of admitted key");
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.lock().record_promotion();

        debug!(count, k = self.k, "promoted key into main store");
    }

    /// Removes `key` from the main store. Its history count, if any, is kept.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.main.remove(key)
    }

    /// `true` if `key` has been admitted; records no access.
    pub fn contains(&self, key: &K) -> bool {
        self.main.contains(key)
    }

    /// Accesses currently recorded in the history store for `key`.
    ///
    /// Does not touch the history store's recency order.
    pub fn history_count(&self, key: &K) -> Option<usize> {
        self.history.peek(key)
    }

    /// Number of admitted entries.
    pub fn len(&self) -> usize {
        self.main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Number of keys with a pending history count.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn capacity(&self) -> usize {
        self.main.capacity()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Empties both stores.
    pub fn clear(&self) {
        self.main.clear();
        self.history.clear();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruKCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn metrics_snapshot(&self) -> LruKMetricsSnapshot {
        let counters = self.metrics.lock().clone();
        LruKMetricsSnapshot {
            history_bumps: counters.history_bumps,
            promotions: counters.promotions,
            gated_puts: counters.gated_puts,
            main_overwrites: counters.main_overwrites,
            k: self.k,
            main: self.main.metrics_snapshot(),
            history: self.history.metrics_snapshot(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruKMetricsSnapshot> for LruKCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn snapshot(&self) -> LruKMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CachePolicy<K, V> for LruKCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        LruKCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        LruKCache::get(self, key)
    }

    fn policy_name(&self) -> &'static str {
        "lru-k"
    }
}

impl<K: Send, V: Send> ConcurrentCache for LruKCache<K, V> {}

impl<K, V> fmt::Debug for LruKCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruKCache")
            .field("k", &self.k)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("history_len", &self.history_len())
            .field("history_capacity", &self.history_capacity())
            .finish_non_exhaustive()
    }
}
