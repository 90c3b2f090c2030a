//! Key Pool Module
//!
//! This module provides an ordered pool of interchangeable API keys for a
//! rate-limited external service, with per-key health tracking and weak
//! round-robin rotation away from failing keys.
//!
//! # Features
//! - Cursor-based rotation over an ordered key list
//! - Per-key success/error counters with an exhaustion threshold
//! - Automatic reset when every key is exhausted, so a run always makes
//!   forward progress
//! - Read-only statistics snapshot for observability
//!
//! # Example
//! ```
//! use keypool::pool::KeyPool;
//!
//! let mut pool = KeyPool::new(["key-a", "key-b"]);
//!
//! let key = pool.current().unwrap().to_string();
//! // ... call the external service with `key` ...
//! pool.record_failure(&key);
//! let next = pool.rotate();
//! assert_eq!(next, Some("key-b"));
//! ```

mod health;
#[allow(clippy::module_inception)]
mod pool;

pub use health::KeyHealth;
pub use pool::{KeyPool, KeyStats, PoolConfig, PoolStats};
