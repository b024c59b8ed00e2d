pub mod recency_list;
pub mod shard;
pub mod slot_arena;

pub use recency_list::{RecencyIter, RecencyList};
pub use shard::{DefaultShardHasher, ShardSelector, resolve_shard_count};
pub use slot_arena::{SlotArena, SlotId};
