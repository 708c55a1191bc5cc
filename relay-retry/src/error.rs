use http::StatusCode;
use thiserror::Error;

use crate::executor::CallFailure;

pub type Result<T> = std::result::Result<T, Error>;

/// Terminal outcome of a retried call.
///
/// The engine returns exactly one of these when it does not return a
/// success value.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote party rejected the request; it was not retried.
    #[error("Forbidden Access: {message}")]
    NonRetryable {
        status: Option<StatusCode>,
        message: String,
    },
    /// Every permitted attempt failed with a transient condition.
    #[error("Max retries reached after {attempts} attempts")]
    RetryExhausted {
        attempts: u32,
        #[source]
        last: CallFailure,
    },
    /// A failure that is neither transient nor an explicit rejection,
    /// re-raised on first occurrence.
    #[error(transparent)]
    Unclassified(anyhow::Error),
    /// The retry policy cannot be used; no attempt was made.
    #[error("Invalid retry configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    /// Returns the remote status code attached to this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::NonRetryable { status, .. } => *status,
            Error::RetryExhausted { last, .. } => last.status(),
            Error::Unclassified(_) | Error::InvalidConfiguration(_) => None,
        }
    }

    /// Returns true if the remote party explicitly rejected the request.
    pub fn is_non_retryable(&self) -> bool {
        matches!(self, Error::NonRetryable { .. })
    }

    /// Returns true if all attempts were used up.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Error::RetryExhausted { .. })
    }
}
