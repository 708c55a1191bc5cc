//! `RetryExecutor` drives an [`Executor`] through the retry loop.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::executor::{CallFailure, Executor};
use crate::policy::{ExponentialBackoff, RetryDecision, RetryPolicy};
use crate::retryable::Retryable;
use crate::retryable_strategy::{DefaultRetryableStrategy, RetryableStrategy};

/// `RetryExecutor` retries calls that fail in a transient manner.
///
/// Each call to [`execute`](RetryExecutor::execute) owns its attempt counter;
/// a single `RetryExecutor` can serve any number of concurrent calls.
/// Attempts within one call are strictly sequential.
///
/// There is no cancellation hook. Wrap the whole call in
/// [`tokio::time::timeout`] to bound it.
///
///```rust
///     use relay_retry::{ExponentialBackoff, RetryExecutor};
///     use std::time::Duration;
///
///     // At most 5 attempts, waiting 100ms, 200ms, 400ms and 800ms in between.
///     let retry_policy = ExponentialBackoff {
///         max_attempts: 5,
///         base_delay: Duration::from_millis(100),
///     };
///
///     let retry = RetryExecutor::new_with_policy(retry_policy);
///     # let _ = retry;
///```
#[derive(Debug, Clone)]
pub struct RetryExecutor<P = ExponentialBackoff, S = DefaultRetryableStrategy> {
    retry_policy: P,
    retryable_strategy: S,
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new_with_policy(ExponentialBackoff::default())
    }
}

impl<P: RetryPolicy> RetryExecutor<P, DefaultRetryableStrategy> {
    /// Construct `RetryExecutor` with a [retry_policy][RetryPolicy].
    pub fn new_with_policy(retry_policy: P) -> Self {
        Self::new_with_policy_and_strategy(retry_policy, DefaultRetryableStrategy)
    }
}

impl<P, S> RetryExecutor<P, S>
where
    P: RetryPolicy,
    S: RetryableStrategy,
{
    /// Construct `RetryExecutor` with a [retry_policy][RetryPolicy] and a
    /// [retryable_strategy](RetryableStrategy).
    pub fn new_with_policy_and_strategy(retry_policy: P, retryable_strategy: S) -> Self {
        Self {
            retry_policy,
            retryable_strategy,
        }
    }

    pub fn retry_policy(&self) -> &P {
        &self.retry_policy
    }

    /// Run `request` through `executor` until it succeeds, fails fatally or
    /// runs out of attempts.
    pub async fn execute<E: Executor>(
        &self,
        executor: &E,
        request: &E::Request,
    ) -> Result<E::Response> {
        self.retry_policy.validate()?;

        let mut n_past_attempts: u32 = 0;
        loop {
            let attempt = n_past_attempts;
            let failure = match executor.call(request).await {
                Ok(response) => return Ok(response),
                Err(failure) => failure,
            };
            n_past_attempts = n_past_attempts.saturating_add(1);

            match self.retryable_strategy.handle(&failure) {
                Some(Retryable::Transient) => {
                    match self.retry_policy.should_retry(n_past_attempts) {
                        RetryDecision::Retry { execute_after } => {
                            log_transient(attempt, &failure, Some(execute_after));
                            tokio::time::sleep(execute_after).await;
                        }
                        RetryDecision::DoNotRetry => {
                            log_transient(attempt, &failure, None);
                            return Err(Error::RetryExhausted {
                                attempts: n_past_attempts,
                                last: failure,
                            });
                        }
                    }
                }
                Some(Retryable::Fatal) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(
                        attempt,
                        classification = "non_retryable",
                        status = ?failure.status(),
                        error = %failure,
                        "Request rejected, skipping remaining attempts"
                    );
                    return Err(Error::NonRetryable {
                        status: failure.status(),
                        message: failure.message(),
                    });
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(
                        attempt,
                        classification = "unclassified",
                        error = %failure,
                        "Unexpected error"
                    );
                    return Err(Error::Unclassified(failure.into_anyhow()));
                }
            }
        }
    }
}

#[cfg(feature = "tracing")]
fn log_transient(attempt: u32, failure: &CallFailure, wait: Option<Duration>) {
    match wait {
        Some(wait) => tracing::error!(
            attempt,
            classification = "retryable",
            status = ?failure.status(),
            error = %failure,
            "Server fault, retrying request in {:?}",
            wait
        ),
        None => tracing::error!(
            attempt,
            classification = "retryable",
            status = ?failure.status(),
            error = %failure,
            "Server fault on the final attempt"
        ),
    }
}

#[cfg(not(feature = "tracing"))]
fn log_transient(_attempt: u32, _failure: &CallFailure, _wait: Option<Duration>) {}

/// Run `request` through `executor` with an [`ExponentialBackoff`] of
/// `max_attempts` attempts starting at `base_delay`.
///
/// Fails with [`Error::InvalidConfiguration`] before any attempt if either
/// value is zero.
pub async fn execute_with_retry<E: Executor>(
    executor: &E,
    request: &E::Request,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<E::Response> {
    let retry_policy = ExponentialBackoff::new(max_attempts, base_delay)?;
    RetryExecutor::new_with_policy(retry_policy)
        .execute(executor, request)
        .await
}
