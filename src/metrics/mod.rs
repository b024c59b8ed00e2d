//! Feature-gated (`metrics`) counters for the cache engines.
//!
//! Recorders are plain structs mutated under the owning cache's lock;
//! snapshots are `Copy` values taken on demand.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
