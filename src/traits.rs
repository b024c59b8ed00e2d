//! # Cache Trait Hierarchy
//!
//! Two families of traits live here:
//!
//! - The **single-threaded engine traits** (`CoreCache`, `MutableCache`,
//!   `LruCacheTrait`) take `&mut self` and are implemented by lock-free cores
//!   such as [`LruCore`](crate::policy::lru::LruCore).
//! - The **policy contract** [`CachePolicy`] takes `&self`. Every engine that
//!   callers share across threads implements it, and hit-rate drivers depend on
//!   nothing else.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐     ┌─────────────────────────────────────┐
//!   │            CoreCache<K, V>              │     │         CachePolicy<K, V>           │
//!   │                                         │     │                                     │
//!   │  insert(&mut, K, V) → Option<V>         │     │  put(&, K, V)                       │
//!   │  get(&mut, &K) → Option<&V>             │     │  get(&, &K) → Option<V>             │
//!   │  contains / len / capacity / clear      │     │  get_or_default(&, &K) → V          │
//!   └──────────────────┬──────────────────────┘     │  policy_name(&) → &'static str      │
//!                      │                            └─────────────────┬───────────────────┘
//!                      ▼                                              │
//!   ┌─────────────────────────────────────────┐          ┌────────────┼──────────────┐
//!   │          MutableCache<K, V>             │          ▼            ▼              ▼
//!   │  remove(&mut, &K) → Option<V>           │      LruCache     LruKCache   ShardedLruCache
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru / peek_lru / touch             │
//!   │  recency_rank                           │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Presence vs. default
//!
//! [`CachePolicy::get`] is the primary lookup: `Some(v)` means the key was
//! present, `None` means it was not. [`CachePolicy::get_or_default`] discards
//! that distinction, so a stored `V::default()` and a miss look the same. Code
//! that branches on presence must use `get`.
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//! use lrukit::traits::CachePolicy;
//!
//! let cache: LruCache<u32, String> = LruCache::new(4);
//! cache.put(1, String::new());
//!
//! assert_eq!(cache.get(&1), Some(String::new())); // present, empty
//! assert_eq!(cache.get(&2), None);                // absent
//! assert_eq!(cache.get_or_default(&1), cache.get_or_default(&2));
//! ```

/// Universal single-threaded cache operations.
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, returning the previous value if any.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`, recording the access with the engine's policy.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Presence check that leaves eviction order untouched.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live entries.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Adds arbitrary key removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// LRU-specific operations.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without reordering.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` most recently used; `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, 0 being the most recently used.
    ///
    /// O(n): walks the recency list, unlike the other operations here.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Capability contract shared by every eviction engine.
///
/// All methods take `&self`: engines synchronise internally, so one instance
/// can be driven from many threads behind an `Arc`. Implementations must not
/// change any state on a miss.
pub trait CachePolicy<K, V> {
    /// Inserts or overwrites the value for `key`.
    fn put(&self, key: K, value: V);

    /// Returns the value for `key`, or `None` when it is absent.
    fn get(&self, key: &K) -> Option<V>;

    /// Returns the value for `key`, or `V::default()` when it is absent.
    fn get_or_default(&self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }

    /// Short label for logs and reports.
    fn policy_name(&self) -> &'static str;
}

/// Marker for caches that are safe to share across threads.
///
/// Usage: `fn drive<C: CachePolicy<K, V> + ConcurrentCache>(cache: &C)`.
pub trait ConcurrentCache: Send + Sync {}
