//! # Metrics Trait Hierarchy
//!
//! Mirrors the cache traits by separating *recording* from *snapshotting*.
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get_hit/get_miss/insert    │
//!                 │  evicted_entry/clear        │
//!                 └──────────────┬──────────────┘
//!                                │
//!                                ▼
//!                 ┌─────────────────────────────┐
//!                 │     LruMetricsRecorder      │
//!                 │  pop_lru/touch/remove       │
//!                 └─────────────────────────────┘
//!
//!                 ┌─────────────────────────────┐
//!                 │    LruKMetricsRecorder      │
//!                 │  history_bump/promotion/    │
//!                 │  gated_put/main_overwrite   │
//!                 └─────────────────────────────┘
//!
//!   Consumption:  MetricsSnapshotProvider<S>::snapshot() -> S
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
}

/// Metrics for the delayed-admission layer of LRU-K.
pub trait LruKMetricsRecorder {
    /// A get or put bumped the history count of a key.
    fn record_history_bump(&mut self);
    /// A key reached the threshold and was admitted to the main store.
    fn record_promotion(&mut self);
    /// A put for a non-resident key stayed behind the admission gate.
    fn record_gated_put(&mut self);
    /// A put overwrote a key already resident in the main store.
    fn record_main_overwrite(&mut self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
