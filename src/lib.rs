//! lrukit: exact LRU, LRU-K and sharded LRU caches behind one policy contract.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! fn hit_rate<C: CachePolicy<u64, u64>>(cache: &C, trace: &[u64]) -> f64 {
//!     let mut hits = 0;
//!     for &key in trace {
//!         match cache.get(&key) {
//!             Some(_) => hits += 1,
//!             None => cache.put(key, key),
//!         }
//!     }
//!     hits as f64 / trace.len() as f64
//! }
//!
//! let trace = [1, 2, 1, 3, 1, 2];
//! let lru = LruCache::new(2);
//! assert!(hit_rate(&lru, &trace) > 0.0);
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
