//! Error recovery strategies for batch classification.
//!
//! Classification errors are never retried: the input that produced them will
//! produce them again. The only choice a caller has is whether a bad item
//! aborts the whole batch or is dropped from it.

use crate::{CoreError, ErrorExt};
use tracing::warn;

/// Recovery strategy for handling errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Skip the item and continue with the rest of the batch
    Skip,
    /// Fail immediately and propagate the error
    Fail,
}

/// How a batch caller wants invalid items handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Stop at the first error
    #[default]
    FailFast,
    /// Drop items whose errors are recoverable
    SkipInvalid,
}

/// Result of an error recovery attempt
#[derive(Debug)]
pub enum RecoveryResult<T> {
    /// The operation succeeded
    Recovered(T),
    /// The operation failed and the item should be skipped
    Skipped(CoreError),
    /// The operation failed and the error should be propagated
    Failed(CoreError),
}

impl<T> RecoveryResult<T> {
    pub fn is_recovered(&self) -> bool {
        matches!(self, RecoveryResult::Recovered(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RecoveryResult::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RecoveryResult::Failed(_))
    }

    /// Converts into `Ok(Some(value))`, `Ok(None)` for skipped items, or the propagated error
    pub fn into_result(self) -> Result<Option<T>, CoreError> {
        match self {
            RecoveryResult::Recovered(value) => Ok(Some(value)),
            RecoveryResult::Skipped(_) => Ok(None),
            RecoveryResult::Failed(error) => Err(error),
        }
    }
}

/// Error recovery handler that maps errors and batch policies to strategies
pub struct ErrorRecovery;

impl ErrorRecovery {
    /// Determine the appropriate recovery strategy for a given error
    pub fn determine_strategy(error: &CoreError, policy: BatchPolicy) -> RecoveryStrategy {
        match policy {
            BatchPolicy::FailFast => RecoveryStrategy::Fail,
            BatchPolicy::SkipInvalid if error.is_recoverable() => RecoveryStrategy::Skip,
            // Configuration and IO problems affect every item, not just this one
            BatchPolicy::SkipInvalid => RecoveryStrategy::Fail,
        }
    }

    /// Run an operation once and apply the policy to its error, if any
    pub fn apply_policy<F, T>(policy: BatchPolicy, operation: F) -> RecoveryResult<T>
    where
        F: FnOnce() -> Result<T, CoreError>,
    {
        match operation() {
            Ok(value) => RecoveryResult::Recovered(value),
            Err(error) => match Self::determine_strategy(&error, policy) {
                RecoveryStrategy::Skip => {
                    warn!("Skipping item: {}", error.user_friendly_message());
                    RecoveryResult::Skipped(error)
                }
                RecoveryStrategy::Fail => RecoveryResult::Failed(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io;

    #[test]
    fn test_skip_invalid_input() {
        let result: RecoveryResult<&str> =
            ErrorRecovery::apply_policy(BatchPolicy::SkipInvalid, || {
                Err(CoreError::invalid_input("test"))
            });

        assert!(result.is_skipped());
        assert!(matches!(result.into_result(), Ok(None)));
    }

    #[test]
    fn test_fail_fast_propagates() {
        let result: RecoveryResult<&str> = ErrorRecovery::apply_policy(BatchPolicy::FailFast, || {
            Err(CoreError::invalid_input("test"))
        });

        assert!(result.is_failed());
        assert!(matches!(
            result.into_result(),
            Err(CoreError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_success_is_recovered() {
        let result = ErrorRecovery::apply_policy(BatchPolicy::FailFast, || Ok(7));
        assert!(result.is_recovered());
        assert_eq!(result.into_result().unwrap(), Some(7));
    }

    #[test]
    fn test_determine_strategy() {
        let io_error = CoreError::Io(io::Error::new(io::ErrorKind::Other, "test"));
        assert_eq!(
            ErrorRecovery::determine_strategy(&io_error, BatchPolicy::SkipInvalid),
            RecoveryStrategy::Fail
        );

        let config_error = CoreError::Config(ConfigError::ValidationFailed {
            reason: "test".to_string(),
        });
        assert_eq!(
            ErrorRecovery::determine_strategy(&config_error, BatchPolicy::SkipInvalid),
            RecoveryStrategy::Fail
        );

        let input_error = CoreError::invalid_input("test");
        assert_eq!(
            ErrorRecovery::determine_strategy(&input_error, BatchPolicy::SkipInvalid),
            RecoveryStrategy::Skip
        );
        assert_eq!(
            ErrorRecovery::determine_strategy(&input_error, BatchPolicy::FailFast),
            RecoveryStrategy::Fail
        );
    }
}
