use std::time::Duration;

use crate::error::{Error, Result};

/// Attempts made by [`ExponentialBackoff::default`], the first one included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Wait after the first transient failure in [`ExponentialBackoff::default`].
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// What to do after a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait `execute_after`, then make another attempt.
    Retry { execute_after: Duration },
    /// No attempts left.
    DoNotRetry,
}

/// Decides whether and when a transiently failed call is attempted again.
pub trait RetryPolicy {
    /// Called after `n_past_attempts` attempts have failed transiently.
    fn should_retry(&self, n_past_attempts: u32) -> RetryDecision;

    /// Checked once before the first attempt.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Waits `base_delay * 2^i` after the failed attempt `i` (0-based), for at
/// most `max_attempts` attempts in total.
///
/// ```
/// use relay_retry::ExponentialBackoff;
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::new(4, Duration::from_millis(1000)).unwrap();
/// assert_eq!(backoff.delay_after(0), Duration::from_millis(1000));
/// assert_eq!(backoff.delay_after(1), Duration::from_millis(2000));
/// assert_eq!(backoff.delay_after(2), Duration::from_millis(4000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialBackoff {
    /// Total tries including the first. (1 = no retry)
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl ExponentialBackoff {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Result<Self> {
        let policy = Self {
            max_attempts,
            base_delay,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Wait inserted after the 0-based attempt `attempt` failed.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn should_retry(&self, n_past_attempts: u32) -> RetryDecision {
        match n_past_attempts.checked_sub(1) {
            None => RetryDecision::Retry {
                execute_after: Duration::ZERO,
            },
            Some(_) if n_past_attempts >= self.max_attempts => RetryDecision::DoNotRetry,
            Some(last_attempt) => RetryDecision::Retry {
                execute_after: self.delay_after(last_attempt),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfiguration(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.base_delay.is_zero() {
            return Err(Error::InvalidConfiguration(
                "base_delay must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
