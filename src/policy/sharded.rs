//! # Sharded LRU Cache
//!
//! One logical cache split into N independent [`LruCache`] shards, each with
//! its own lock, so threads working on different keys rarely contend.
//!
//! ## Architecture
//!
//! ```text
//!   put(key, value) / get(key)
//!          │
//!          ▼
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │  ShardSelector: hash(seed, key) % shard_count                 │
//!   └───────────────────────────────────────────────────────────────┘
//!          │
//!          ▼
//!   ┌──────────────┬──────────────┬──────────────┬──────────────┐
//!   │  LruCache 0  │  LruCache 1  │  LruCache 2  │  LruCache 3  │
//!   │  Mutex       │  Mutex       │  Mutex       │  Mutex       │
//!   │  cap = ⌈C/N⌉ │  cap = ⌈C/N⌉ │  cap = ⌈C/N⌉ │  cap = ⌈C/N⌉ │
//!   └──────────────┴──────────────┴──────────────┴──────────────┘
//! ```
//!
//! Every key lives in exactly one shard for the lifetime of the cache: the
//! shard count is fixed at construction and the default hasher state carries
//! fixed keys. Recency is exact within a shard only; there is no global LRU
//! order and no cross-shard rebalancing.
//!
//! Per-shard capacity is rounded up, so the realised total
//! (`shard_count * shard_capacity`) may exceed the requested capacity by up to
//! `shard_count - 1` entries.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::sharded::ShardedLruCache;
//!
//! let cache = ShardedLruCache::new(100, 4);
//! cache.put("user:1", 42);
//!
//! assert_eq!(cache.get(&"user:1"), Some(42));
//! assert_eq!(cache.shard_count(), 4);
//! assert_eq!(cache.shard_capacity(), 25);
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hash};

use tracing::debug;

use crate::ds::{resolve_shard_count, DefaultShardHasher, ShardSelector};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::lru::LruCache;
use crate::traits::{CachePolicy, ConcurrentCache};

/// LRU cache partitioned into independently locked shards.
pub struct ShardedLruCache<K, V, S = DefaultShardHasher> {
    shards: Box<[LruCache<K, V>]>,
    selector: ShardSelector<S>,
    shard_capacity: usize,
}

impl<K, V> ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache of roughly `capacity` entries over `shard_count`
    /// shards; a `shard_count` of 0 uses one shard per hardware thread.
    pub fn new(capacity: usize, shard_count: usize) -> Self {
        Self::with_hasher(capacity, shard_count, DefaultShardHasher::default())
    }
}

impl<K, V, S> ShardedLruCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Like [`new`](ShardedLruCache::new) but routes keys with `hasher`.
    pub fn with_hasher(capacity: usize, shard_count: usize, hasher: S) -> Self {
        let selector = ShardSelector::with_hasher(resolve_shard_count(shard_count), 0, hasher);
        Self::with_selector(capacity, selector)
    }

    /// Builds the shards from a ready-made selector, keeping its seed.
    pub fn with_selector(capacity: usize, selector: ShardSelector<S>) -> Self {
        let shard_count = selector.shard_count();
        let shard_capacity = capacity.div_ceil(shard_count);
        let shards = (0..shard_count)
            .map(|_| LruCache::new(shard_capacity))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(
            shards = shard_count,
            shard_capacity,
            requested_capacity = capacity,
            "created sharded lru cache"
        );

        Self {
            shards,
            selector,
            shard_capacity,
        }
    }

    #[inline]
    fn shard(&self, key: &K) -> &LruCache<K, V> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    /// Index of the shard that owns `key`.
    pub fn shard_index(&self, key: &K) -> usize {
        self.selector.shard_for_key(key)
    }

    /// Inserts or overwrites `key` in its shard.
    pub fn put(&self, key: K, value: V) {
        self.shard(&key).put(key, value);
    }

    /// Looks `key` up in its shard, touching it there.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).contains(key)
    }

    /// Live entries summed over all shards.
    ///
    /// Shards are locked one after another, so under concurrent writes the
    /// sum is not a point-in-time value.
    pub fn len(&self) -> usize {
        self.shards.iter().map(LruCache::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(LruCache::is_empty)
    }

    /// Realised capacity: `shard_count * shard_capacity`.
    pub fn capacity(&self) -> usize {
        self.shard_capacity * self.shards.len()
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn shard_capacity(&self) -> usize {
        self.shard_capacity
    }

    /// Live entries in shard `index`, or `None` if out of range.
    pub fn shard_len(&self, index: usize) -> Option<usize> {
        self.shards.get(index).map(LruCache::len)
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.clear();
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> ShardedLruCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Counters and gauges folded over every shard.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.shards
            .iter()
            .fold(LruMetricsSnapshot::default(), |mut total, shard| {
                total += shard.metrics_snapshot();
                total
            })
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsSnapshotProvider<LruMetricsSnapshot> for ShardedLruCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V, S> CachePolicy<K, V> for ShardedLruCache<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn put(&self, key: K, value: V) {
        ShardedLruCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        ShardedLruCache::get(self, key)
    }

    fn policy_name(&self) -> &'static str {
        "sharded-lru"
    }
}

impl<K: Send, V: Send, S: Send + Sync> ConcurrentCache for ShardedLruCache<K, V, S> {}

impl<K, V, S> fmt::Debug for ShardedLruCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLruCache")
            .field("shard_count", &self.shard_count())
            .field("shard_capacity", &self.shard_capacity)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
