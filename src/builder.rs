//! Unified cache builder for the LRU family.
//!
//! Collects the knobs of every engine in one place and hands back a [`Cache`]
//! that implements [`CachePolicy`] whichever engine sits behind it.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::{CacheBuilder, EvictionPolicy};
//!
//! let cache = CacheBuilder::new(100).build::<u64, String>(EvictionPolicy::Lru);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! ```

use std::hash::Hash;

use crate::ds::{resolve_shard_count, ShardSelector};
use crate::error::ConfigError;
use crate::policy::lru::LruCache;
use crate::policy::lru_k::LruKCache;
use crate::policy::sharded::ShardedLruCache;
use crate::traits::{CachePolicy, ConcurrentCache};

/// Available eviction engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Exact least-recently-used eviction.
    Lru,
    /// Delayed admission: `k` accesses before entering the LRU main store.
    LruK,
    /// LRU split into independently locked shards.
    Sharded,
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    LruK(LruKCache<K, V>),
    Sharded(ShardedLruCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Which engine backs this cache.
    pub fn policy(&self) -> EvictionPolicy {
        match &self.inner {
            CacheInner::Lru(_) => EvictionPolicy::Lru,
            CacheInner::LruK(_) => EvictionPolicy::LruK,
            CacheInner::Sharded(_) => EvictionPolicy::Sharded,
        }
    }

    /// Insert or overwrite a key-value pair.
    pub fn put(&self, key: K, value: V) {
        match &self.inner {
            CacheInner::Lru(lru) => lru.put(key, value),
            CacheInner::LruK(lruk) => lruk.put(key, value),
            CacheInner::Sharded(sharded) => sharded.put(key, value),
        }
    }

    /// Get a value by key, recording the access with the engine.
    pub fn get(&self, key: &K) -> Option<V> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::LruK(lruk) => lruk.get(key),
            CacheInner::Sharded(sharded) => sharded.get(key),
        }
    }

    /// Check if a key is stored, without recording an access.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::LruK(lruk) => lruk.contains(key),
            CacheInner::Sharded(sharded) => sharded.contains(key),
        }
    }

    /// Get the number of stored entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::LruK(lruk) => lruk.len(),
            CacheInner::Sharded(sharded) => sharded.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the capacity. For the sharded engine this is the rounded-up total.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::LruK(lruk) => lruk.capacity(),
            CacheInner::Sharded(sharded) => sharded.capacity(),
        }
    }

    /// Remove all entries (and any LRU-K history).
    pub fn clear(&self) {
        match &self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::LruK(lruk) => lruk.clear(),
            CacheInner::Sharded(sharded) => sharded.clear(),
        }
    }
}

impl<K, V> CachePolicy<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        Cache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        Cache::get(self, key)
    }

    fn policy_name(&self) -> &'static str {
        match &self.inner {
            CacheInner::Lru(lru) => lru.policy_name(),
            CacheInner::LruK(lruk) => lruk.policy_name(),
            CacheInner::Sharded(sharded) => sharded.policy_name(),
        }
    }
}

impl<K: Send, V: Send> ConcurrentCache for Cache<K, V> {}

impl<K, V> std::fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    capacity: usize,
    history_capacity: Option<usize>,
    k: usize,
    shards: usize,
    seed: u64,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            history_capacity: None,
            k: 2,
            shards: 0,
            seed: 0,
        }
    }

    /// LRU-K history size; defaults to the main capacity.
    pub fn history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = Some(history_capacity);
        self
    }

    /// LRU-K admission threshold; defaults to 2.
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Shard count for the sharded engine; 0 (the default) means one per
    /// hardware thread.
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Routing seed for the sharded engine.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build a cache with the specified policy, clamping `k` to at least 1.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lrukit::builder::{CacheBuilder, EvictionPolicy};
    ///
    /// // LRU
    /// let cache = CacheBuilder::new(100).build::<u64, String>(EvictionPolicy::Lru);
    ///
    /// // LRU-K with K=3 and a larger history
    /// let cache = CacheBuilder::new(100)
    ///     .k(3)
    ///     .history_capacity(1_000)
    ///     .build::<u64, String>(EvictionPolicy::LruK);
    ///
    /// // 8 shards
    /// let cache = CacheBuilder::new(100)
    ///     .shards(8)
    ///     .build::<u64, String>(EvictionPolicy::Sharded);
    /// assert_eq!(cache.capacity(), 104);
    /// ```
    pub fn build<K, V>(self, policy: EvictionPolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let history_capacity = self.history_capacity.unwrap_or(self.capacity);
        let inner = match policy {
            EvictionPolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            EvictionPolicy::LruK => {
                CacheInner::LruK(LruKCache::new(self.capacity, history_capacity, self.k))
            },
            EvictionPolicy::Sharded => {
                let selector = ShardSelector::new(resolve_shard_count(self.shards), self.seed);
                CacheInner::Sharded(ShardedLruCache::with_selector(self.capacity, selector))
            },
        };

        Cache { inner }
    }

    /// Like [`build`](Self::build) but rejects settings that `build` would
    /// silently clamp or that leave an engine unable to do its job.
    pub fn try_build<K, V>(self, policy: EvictionPolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        if policy == EvictionPolicy::LruK {
            if self.k == 0 {
                return Err(ConfigError::new("k must be at least 1"));
            }
            if self.history_capacity.unwrap_or(self.capacity) == 0 {
                return Err(ConfigError::new(
                    "history_capacity must be greater than 0 for LRU-K",
                ));
            }
        }
        Ok(self.build(policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EvictionPolicy; 3] = [
        EvictionPolicy::Lru,
        EvictionPolicy::LruK,
        EvictionPolicy::Sharded,
    ];

    #[test]
    fn test_all_policies_basic_ops() {
        for policy in ALL {
            let cache = CacheBuilder::new(10)
                .k(1)
                .shards(2)
                .build::<u64, String>(policy);
            assert_eq!(cache.policy(), policy);

            // Insert
            cache.put(1, "one".to_string());
            cache.put(2, "two".to_string());

            // Get
            assert_eq!(cache.get(&1), Some("one".to_string()));
            assert_eq!(cache.get(&2), Some("two".to_string()));
            assert_eq!(cache.get(&3), None);

            // Contains
            assert!(cache.contains(&1));
            assert!(!cache.contains(&99));

            // Len
            assert_eq!(cache.len(), 2);
            assert!(!cache.is_empty());

            // Update
            cache.put(1, "ONE".to_string());
            assert_eq!(cache.get(&1), Some("ONE".to_string()));
            assert_eq!(cache.len(), 2);

            // Clear
            cache.clear();
            assert!(cache.is_empty());
        }
    }

    #[test]
    fn test_capacity_enforcement() {
        let cache = CacheBuilder::new(2).build::<u64, String>(EvictionPolicy::Lru);

        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        cache.put(3, "three".to_string()); // Should evict key 1

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1)); // Evicted
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn test_lru_k_defaults_to_k2() {
        let cache = CacheBuilder::new(4).build::<u64, u64>(EvictionPolicy::LruK);
        cache.put(1, 1);
        assert!(!cache.contains(&1));
        cache.put(1, 1);
        assert!(cache.contains(&1));
    }

    #[test]
    fn test_policy_names() {
        let names: Vec<_> = ALL
            .iter()
            .map(|&p| CacheBuilder::new(4).shards(1).build::<u8, u8>(p).policy_name())
            .collect();
        assert_eq!(names, ["lru", "lru-k", "sharded-lru"]);
    }

    #[test]
    fn test_sharded_capacity_rounds_up() {
        let cache = CacheBuilder::new(10)
            .shards(4)
            .build::<u32, u32>(EvictionPolicy::Sharded);
        assert_eq!(cache.capacity(), 12);
    }

    #[test]
    fn test_try_build_rejects_zero_k() {
        let err = CacheBuilder::new(10)
            .k(0)
            .try_build::<u32, u32>(EvictionPolicy::LruK)
            .unwrap_err();
        assert_eq!(err.message(), "k must be at least 1");
    }

    #[test]
    fn test_try_build_rejects_zero_history() {
        assert!(CacheBuilder::new(10)
            .history_capacity(0)
            .try_build::<u32, u32>(EvictionPolicy::LruK)
            .is_err());
        assert!(CacheBuilder::new(0)
            .try_build::<u32, u32>(EvictionPolicy::LruK)
            .is_err());
    }

    #[test]
    fn test_try_build_ignores_lru_k_knobs_elsewhere() {
        for policy in [EvictionPolicy::Lru, EvictionPolicy::Sharded] {
            let cache = CacheBuilder::new(0).k(0).try_build::<u32, u32>(policy).unwrap();
            cache.put(1, 1);
            assert!(cache.is_empty());
        }
    }

    #[test]
    fn test_build_clamps_zero_k() {
        let cache = CacheBuilder::new(4).k(0).build::<u32, u32>(EvictionPolicy::LruK);
        cache.put(1, 1);
        assert_eq!(cache.get(&1), Some(1));
    }
}
