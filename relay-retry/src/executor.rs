use http::StatusCode;
use thiserror::Error;

/// Performs a single outbound call.
///
/// Implementations must not retry on their own: one invocation of [`call`] is
/// one attempt. The request is borrowed so the same value can be sent on every
/// attempt.
///
/// [`call`]: Executor::call
#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    type Request: Send + Sync;
    type Response: Send;

    async fn call(&self, request: &Self::Request) -> Result<Self::Response, CallFailure>;
}

/// How a single attempt failed.
#[derive(Error, Debug)]
pub enum CallFailure {
    /// The remote party refused access (e.g. HTTP 403).
    #[error("Request rejected with status {status}: {message}")]
    Rejection { status: StatusCode, message: String },
    /// The remote party reported an internal error (e.g. HTTP 500).
    #[error("Server fault with status {status}: {message}")]
    ServerFault { status: StatusCode, message: String },
    /// Anything else: connection errors, timeouts, unexpected statuses,
    /// undecodable bodies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CallFailure {
    pub fn rejection(status: StatusCode, message: impl Into<String>) -> Self {
        CallFailure::Rejection {
            status,
            message: message.into(),
        }
    }

    pub fn server_fault(status: StatusCode, message: impl Into<String>) -> Self {
        CallFailure::ServerFault {
            status,
            message: message.into(),
        }
    }

    /// Returns the status code reported by the remote party, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CallFailure::Rejection { status, .. } | CallFailure::ServerFault { status, .. } => {
                Some(*status)
            }
            CallFailure::Other(_) => None,
        }
    }

    /// Returns true if the remote party explicitly rejected the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CallFailure::Rejection { .. })
    }

    /// Human readable description of the failure.
    pub fn message(&self) -> String {
        match self {
            CallFailure::Rejection { message, .. } | CallFailure::ServerFault { message, .. } => {
                message.clone()
            }
            CallFailure::Other(error) => error.to_string(),
        }
    }

    pub(crate) fn into_anyhow(self) -> anyhow::Error {
        match self {
            CallFailure::Other(error) => error,
            failure => anyhow::Error::new(failure),
        }
    }
}
