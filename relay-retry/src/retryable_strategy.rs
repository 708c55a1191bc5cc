use crate::executor::CallFailure;
use crate::retryable::Retryable;

/// A strategy to create a [`Retryable`] from a [`CallFailure`].
///
/// Returning `None` marks the failure as unclassified: the retry loop stops
/// and hands the original error back to the caller without waiting.
///
/// Example:
///
/// ```
/// use http::StatusCode;
/// use relay_retry::{
///     default_on_call_failure, CallFailure, ExponentialBackoff, RetryExecutor, Retryable,
///     RetryableStrategy,
/// };
///
/// // Also retry gateway timeouts reported as rejections by a flaky proxy.
/// struct RetryGatewayTimeout;
///
/// impl RetryableStrategy for RetryGatewayTimeout {
///     fn handle(&self, failure: &CallFailure) -> Option<Retryable> {
///         match failure.status() {
///             Some(StatusCode::GATEWAY_TIMEOUT) => Some(Retryable::Transient),
///             _ => default_on_call_failure(failure),
///         }
///     }
/// }
///
/// let retry = RetryExecutor::new_with_policy_and_strategy(
///     ExponentialBackoff::default(),
///     RetryGatewayTimeout,
/// );
/// # let _ = retry;
/// ```
pub trait RetryableStrategy {
    fn handle(&self, failure: &CallFailure) -> Option<Retryable>;
}

/// The default [`RetryableStrategy`] for [`RetryExecutor`](crate::RetryExecutor).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetryableStrategy;

impl RetryableStrategy for DefaultRetryableStrategy {
    fn handle(&self, failure: &CallFailure) -> Option<Retryable> {
        default_on_call_failure(failure)
    }
}

/// Default classification of a failed attempt.
///
/// Only server faults are retried. Rejections abort the loop, and every other
/// failure (connection errors included) is left unclassified.
pub fn default_on_call_failure(failure: &CallFailure) -> Option<Retryable> {
    match failure {
        CallFailure::Rejection { .. } => Some(Retryable::Fatal),
        CallFailure::ServerFault { .. } => Some(Retryable::Transient),
        CallFailure::Other(_) => None,
    }
}
