use crate::executor::CallFailure;
use crate::retryable_strategy::{DefaultRetryableStrategy, RetryableStrategy};

/// Classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retryable {
    /// The failure was due to something that might resolve in the future.
    Transient,
    /// The request will never succeed as-is.
    Fatal,
}

impl Retryable {
    /// Try to map a failed attempt into `Retryable`.
    ///
    /// Returns `None` if the failure belongs to neither class.
    pub fn from_call_failure(failure: &CallFailure) -> Option<Self> {
        DefaultRetryableStrategy.handle(failure)
    }
}
