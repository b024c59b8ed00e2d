//! Error types for the lrukit library.
//!
//! Cache operations themselves never fail: a miss is `None`, and a cache built
//! with capacity 0 silently stores nothing. Errors only appear at the edges:
//!
//! - [`ConfigError`]: returned by [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build)
//!   when a parameter cannot be honoured (e.g. an LRU-K threshold of 0).
//! - [`InvariantError`]: returned by `check_invariants` methods when the key
//!   index and the recency list disagree.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::builder::{CacheBuilder, EvictionPolicy};
//! use lrukit::error::ConfigError;
//!
//! let err: ConfigError = CacheBuilder::new(100)
//!     .k(0)
//!     .try_build::<u64, String>(EvictionPolicy::LruK)
//!     .unwrap_err();
//! assert!(err.to_string().contains("k"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`LruCore::check_invariants`](crate::policy::lru::LruCore::check_invariants)
/// and [`RecencyList::check_invariants`](crate::ds::RecencyList::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are rejected.
///
/// Only the strict builder path produces it; the plain constructors clamp or
/// disable instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cache configuration: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}
