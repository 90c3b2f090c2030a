//! Failover error types
//!
//! Individual attempt failures stay internal to the failover loop: they are
//! logged, counted against the key that produced them, and drive rotation.
//! Only the two terminal outcomes below reach the caller.

use thiserror::Error;

/// Terminal error for a failover run, generic over the attempt error type.
#[derive(Error, Debug)]
pub enum FailoverError<E> {
    /// The pool holds zero usable keys. Fatal to the operation, no retry.
    #[error("no usable API keys configured")]
    NoKeysConfigured,

    /// Every key in the pool was tried once and every attempt failed.
    /// The last attempt's error is carried for diagnostics.
    #[error("all {attempts} API keys failed, last error: {last}")]
    AllKeysFailed {
        /// Number of attempts made (the pool size at the start of the run).
        attempts: usize,
        /// The error from the final attempt.
        last: E,
    },
}

impl<E> FailoverError<E> {
    /// Get the last underlying attempt error, if any.
    pub fn last_error(&self) -> Option<&E> {
        match self {
            FailoverError::AllKeysFailed { last, .. } => Some(last),
            FailoverError::NoKeysConfigured => None,
        }
    }

    /// Consume the error, returning the last underlying attempt error.
    pub fn into_last_error(self) -> Option<E> {
        match self {
            FailoverError::AllKeysFailed { last, .. } => Some(last),
            FailoverError::NoKeysConfigured => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_no_keys() {
        let err: FailoverError<String> = FailoverError::NoKeysConfigured;
        assert_eq!(err.to_string(), "no usable API keys configured");
        assert!(err.last_error().is_none());
    }

    #[test]
    fn test_display_all_failed() {
        let err = FailoverError::AllKeysFailed {
            attempts: 3,
            last: "429 Too Many Requests".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "all 3 API keys failed, last error: 429 Too Many Requests"
        );
    }

    #[test]
    fn test_into_last_error() {
        let err = FailoverError::AllKeysFailed {
            attempts: 2,
            last: "boom".to_string(),
        };
        assert_eq!(err.into_last_error(), Some("boom".to_string()));

        let err: FailoverError<String> = FailoverError::NoKeysConfigured;
        assert_eq!(err.into_last_error(), None);
    }
}
