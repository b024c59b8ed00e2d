//! Eviction engines.
//!
//! | Engine                       | Admission          | Locking              |
//! |------------------------------|--------------------|----------------------|
//! | [`lru::LruCache`]            | immediate          | one mutex            |
//! | [`lru_k::LruKCache`]         | after `k` accesses | one mutex per store  |
//! | [`sharded::ShardedLruCache`] | immediate          | one mutex per shard  |

pub mod lru;
pub mod lru_k;
pub mod sharded;
