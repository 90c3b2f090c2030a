//! Per-attempt deadline helper
//!
//! The pool and failover loop impose no timeout of their own; a caller that
//! wants one races each attempt against a fixed deadline and feeds expiry
//! into the loop as an ordinary failure.

use std::time::Duration;

/// Apply a deadline to an async operation.
///
/// Expiry is reported as [`TimeoutError::Timeout`]; the operation's own
/// error comes back as [`TimeoutError::Inner`].
pub async fn with_timeout<T, E>(
    limit: Duration,
    future: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, TimeoutError<E>> {
    match tokio::time::timeout(limit, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(TimeoutError::Inner(err)),
        Err(_) => Err(TimeoutError::Timeout(limit)),
    }
}

/// Error type for deadline-wrapped operations
#[derive(Debug, thiserror::Error)]
pub enum TimeoutError<E> {
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Inner(E),
}

impl<E> TimeoutError<E> {
    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, TimeoutError::Timeout(_))
    }

    /// Get the inner error if not a timeout
    pub fn into_inner(self) -> Option<E> {
        match self {
            TimeoutError::Inner(e) => Some(e),
            TimeoutError::Timeout(_) => None,
        }
    }
}
