//! Rotating API-key pool with failover
//!
//! A small building block for callers of rate-limited third-party APIs:
//! hold several interchangeable keys, pick one per call, rotate away from
//! keys that keep failing, and drive a whole call through every key until
//! one succeeds.
//!
//! # Example
//! ```
//! use keypool::{run_with_failover, KeyPool};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let mut pool = KeyPool::new(["key-a", "key-b"]);
//!
//! let result = run_with_failover(&mut pool, |key| async move {
//!     if key == "key-a" {
//!         Err("rate limited".to_string())
//!     } else {
//!         Ok("operation-123".to_string())
//!     }
//! })
//! .await;
//!
//! assert_eq!(result.unwrap(), "operation-123");
//! # });
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod failover;
pub mod pool;
pub mod timeout;

// Re-export commonly used types
pub use config::Settings;
pub use error::FailoverError;
pub use failover::run_with_failover;
pub use pool::{KeyPool, PoolConfig, PoolStats};
pub use timeout::{with_timeout, TimeoutError};
