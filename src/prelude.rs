pub use crate::builder::{Cache, CacheBuilder, EvictionPolicy};
pub use crate::ds::{DefaultShardHasher, RecencyList, ShardSelector, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{LruKMetricsSnapshot, LruMetricsSnapshot};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::policy::lru::{LruCache, LruCore};
pub use crate::policy::lru_k::LruKCache;
pub use crate::policy::sharded::ShardedLruCache;
pub use crate::traits::{CachePolicy, ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
