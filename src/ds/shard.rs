//! Deterministic key-to-shard routing.
//!
//! Used by [`ShardedLruCache`](crate::policy::sharded::ShardedLruCache) to pick
//! the one shard (and therefore the one lock) a key belongs to.
//!
//! ## Architecture
//!
//! ```text
//!   Input Key
//!       │
//!       ▼
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │  ShardSelector { shards: 4, seed: 42, hasher: S }             │
//!   │                                                               │
//!   │  1. hasher = S::build_hasher()                                │
//!   │  2. seed.hash(&mut hasher)                                    │
//!   │  3. key.hash(&mut hasher)                                     │
//!   │  4. hasher.finish() % 4                                       │
//!   └───────────────────────────────────────────────────────────────┘
//!       │
//!       ▼
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! The default hasher state is [`DefaultShardHasher`], a
//! `BuildHasherDefault<DefaultHasher>`. Unlike `RandomState` it carries fixed
//! keys, so a key maps to the same shard for the whole lifetime of a selector
//! (and across selectors built with the same shard count and seed).
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::ds::ShardSelector;
//!
//! let selector = ShardSelector::new(4, 0);
//!
//! let shard = selector.shard_for_key(&"user:123");
//! assert!(shard < 4);
//! assert_eq!(selector.shard_for_key(&"user:123"), shard);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::num::NonZeroUsize;

/// Fixed-key hasher state used for shard routing unless one is supplied.
pub type DefaultShardHasher = BuildHasherDefault<DefaultHasher>;

/// Maps `Hash`able keys to a shard index in `[0, shards)`.
///
/// The same `(key, seed, shards)` always produces the same index as long as
/// the hasher state `S` is deterministic.
#[derive(Debug, Clone)]
pub struct ShardSelector<S = DefaultShardHasher> {
    shards: usize,
    seed: u64,
    hasher: S,
}

impl ShardSelector {
    /// Creates a selector for `shards` shards with the given `seed`.
    ///
    /// The shard count is clamped to at least 1.
    ///
    /// ```
    /// use lrukit::ds::ShardSelector;
    ///
    /// assert_eq!(ShardSelector::new(16, 0).shard_count(), 16);
    /// assert_eq!(ShardSelector::new(0, 0).shard_count(), 1);
    /// ```
    pub fn new(shards: usize, seed: u64) -> Self {
        Self::with_hasher(shards, seed, DefaultShardHasher::default())
    }
}

impl<S: BuildHasher> ShardSelector<S> {
    /// Creates a selector that hashes keys with `hasher`.
    pub fn with_hasher(shards: usize, seed: u64, hasher: S) -> Self {
        Self {
            shards: shards.max(1),
            seed,
            hasher,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Maps a key to a shard index in `[0, shards)`.
    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = self.hasher.build_hasher();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() % self.shards as u64) as usize
    }
}

impl Default for ShardSelector {
    /// Creates a single-shard selector with seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Resolves a requested shard count, where 0 means "one per hardware thread".
///
/// Falls back to a single shard when the platform cannot report its
/// parallelism.
pub fn resolve_shard_count(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
