//! Failover loop driving a unit of work across a key pool
//!
//! This module provides the retry policy that makes the pool useful: try a
//! caller-supplied async operation once per key, rotating on failure, until
//! one attempt succeeds or every key has been tried.

use crate::error::FailoverError;
use crate::pool::KeyPool;
use std::fmt;
use std::future::Future;

/// Execute an async operation with key failover.
///
/// The operation is invoked with one key per attempt, at most once per key
/// in the pool. The first success is returned immediately and recorded
/// against the key that produced it. Each failure is recorded against its
/// key (driving rotation and exhaustion tracking) and the loop moves on to
/// the next key. No delay is inserted between attempts, and no timeout is
/// imposed here: a caller that wants a per-attempt deadline wraps the
/// operation with [`crate::timeout::with_timeout`].
///
/// The attempt bound is the pool size at the start of the run, so the loop
/// terminates even though a failure near the exhaustion threshold can
/// advance the cursor twice.
///
/// # Arguments
/// * `pool` - The key pool for this run (one pool per request batch)
/// * `attempt` - The operation to execute, given the key to use
///
/// # Errors
/// * [`FailoverError::NoKeysConfigured`] when the pool holds no usable keys
/// * [`FailoverError::AllKeysFailed`] when every attempt failed, carrying
///   the last attempt's error
pub async fn run_with_failover<T, E, F, Fut>(
    pool: &mut KeyPool,
    mut attempt: F,
) -> Result<T, FailoverError<E>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let total = pool.len();
    if total == 0 {
        return Err(FailoverError::NoKeysConfigured);
    }

    let mut last_error = None;
    for attempt_no in 1..=total {
        let Some(key) = pool.current().map(str::to_string) else {
            return Err(FailoverError::NoKeysConfigured);
        };

        tracing::debug!(attempt = attempt_no, total, "dispatching attempt");

        match attempt(key.clone()).await {
            Ok(value) => {
                pool.record_success(&key);
                return Ok(value);
            }
            Err(err) => {
                tracing::warn!(
                    attempt = attempt_no,
                    total,
                    error = %err,
                    "attempt failed, rotating to next key"
                );
                pool.record_failure(&key);
                last_error = Some(err);
                pool.rotate();
            }
        }
    }

    match last_error {
        Some(last) => Err(FailoverError::AllKeysFailed {
            attempts: total,
            last,
        }),
        None => Err(FailoverError::NoKeysConfigured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("keypool=debug")
            .try_init();
    }

    #[tokio::test]
    async fn test_empty_pool_fails_without_calling() {
        init_logging();
        let mut pool = KeyPool::new(Vec::<String>::new());
        let calls = Cell::new(0u32);

        let result: Result<i32, _> = run_with_failover(&mut pool, |_key| {
            calls.set(calls.get() + 1);
            async { Ok::<_, String>(1) }
        })
        .await;

        assert!(matches!(result, Err(FailoverError::NoKeysConfigured)));
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_first_attempt_succeeds() {
        let mut pool = KeyPool::new(["k1", "k2"]);
        let calls = Cell::new(0u32);

        let result = run_with_failover(&mut pool, |key| {
            calls.set(calls.get() + 1);
            async move { Ok::<_, String>(key) }
        })
        .await;

        assert_eq!(result.unwrap(), "k1");
        assert_eq!(calls.get(), 1);
        assert_eq!(pool.success_count("k1"), 1);
        assert_eq!(pool.error_count("k1"), 0);
    }

    #[tokio::test]
    async fn test_succeeds_on_last_key() {
        let mut pool = KeyPool::new(["k1", "k2", "k3"]);

        let result = run_with_failover(&mut pool, |key| async move {
            if key == "k3" {
                Ok(format!("ok:{key}"))
            } else {
                Err(format!("bad:{key}"))
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok:k3");
        assert_eq!(pool.error_count("k1"), 1);
        assert_eq!(pool.error_count("k2"), 1);
        assert_eq!(pool.success_count("k3"), 1);
        assert_eq!(pool.error_count("k3"), 0);
    }

    #[tokio::test]
    async fn test_all_keys_fail() {
        init_logging();
        let mut pool = KeyPool::new(["k1", "k2"]);
        let calls = Cell::new(0u32);

        let result: Result<i32, _> = run_with_failover(&mut pool, |key| {
            calls.set(calls.get() + 1);
            async move { Err(format!("refused:{key}")) }
        })
        .await;

        let err = result.unwrap_err();
        match &err {
            FailoverError::AllKeysFailed { attempts, last } => {
                assert_eq!(*attempts, 2);
                assert_eq!(last, "refused:k2");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(calls.get(), 2);
        assert_eq!(pool.error_count("k1"), 1);
        assert_eq!(pool.error_count("k2"), 1);
    }

    #[tokio::test]
    async fn test_last_error_is_surfaced() {
        let mut pool = KeyPool::new(["k1", "k2"]);
        let calls = Cell::new(0u32);

        let result: Result<i32, _> = run_with_failover(&mut pool, |_key| {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Err(format!("error-{n}")) }
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.into_last_error(), Some("error-2".to_string()));
    }

    #[tokio::test]
    async fn test_single_key_pool_makes_one_attempt() {
        let mut pool = KeyPool::new(["only"]);
        let calls = Cell::new(0u32);

        let result: Result<i32, _> = run_with_failover(&mut pool, |_key| {
            calls.set(calls.get() + 1);
            async { Err("down".to_string()) }
        })
        .await;

        assert!(matches!(result, Err(FailoverError::AllKeysFailed { attempts: 1, .. })));
        assert_eq!(calls.get(), 1);
        assert_eq!(pool.error_count("only"), 1);
    }
}
