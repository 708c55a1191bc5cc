//! Retries for outbound calls with exponential backoff.
//!
//! A caller describes one network call by implementing [`Executor`]. The
//! [`RetryExecutor`] drives that call in a loop: it returns on the first
//! success, stops immediately on a failure the [`RetryableStrategy`] deems
//! [`Retryable::Fatal`], re-raises unclassified failures untouched, and sleeps
//! `base_delay * 2^attempt` between transient failures until the
//! [`ExponentialBackoff`] policy runs out of attempts.
//!
//! ```
//! use relay_retry::{execute_with_retry, CallFailure, Executor};
//! use std::time::Duration;
//!
//! struct Echo;
//!
//! #[async_trait::async_trait]
//! impl Executor for Echo {
//!     type Request = String;
//!     type Response = String;
//!
//!     async fn call(&self, request: &String) -> Result<String, CallFailure> {
//!         Ok(request.clone())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let reply = execute_with_retry(&Echo, &"ping".to_string(), 3, Duration::from_millis(1000))
//!     .await
//!     .unwrap();
//! assert_eq!(reply, "ping");
//! # }
//! ```
//!
//! Retried calls are not deduplicated on the remote side: if the remote
//! operation is not idempotent, a server fault followed by a retry may apply
//! it more than once.
mod error;
mod executor;
mod policy;
mod retry;
mod retryable;
mod retryable_strategy;

pub use error::{Error, Result};
pub use executor::{CallFailure, Executor};
pub use policy::{
    ExponentialBackoff, RetryDecision, RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS,
};
pub use retry::{execute_with_retry, RetryExecutor};
pub use retryable::Retryable;
pub use retryable_strategy::{default_on_call_failure, DefaultRetryableStrategy, RetryableStrategy};
