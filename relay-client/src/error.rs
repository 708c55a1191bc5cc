use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The outbound call did not succeed.
    #[error(transparent)]
    Retry(#[from] relay_retry::Error),
    /// The request could not be encoded or the response did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    Payload(#[from] serde_json::Error),
    /// The GraphQL endpoint answered with errors instead of data.
    #[error("GraphQL error: {0}")]
    Graphql(String),
    /// The GraphQL endpoint answered with neither data nor errors.
    #[error("GraphQL response contained no data")]
    MissingData,
}

impl Error {
    /// Returns the status code of the last remote answer, if the error came from one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Retry(e) => e.status(),
            Error::Payload(_) | Error::Graphql(_) | Error::MissingData => None,
        }
    }

    /// Returns true if the remote party refused the request.
    pub fn is_non_retryable(&self) -> bool {
        match self {
            Error::Retry(e) => e.is_non_retryable(),
            _ => false,
        }
    }

    /// Returns true if every attempt failed with a server fault.
    pub fn is_exhausted(&self) -> bool {
        match self {
            Error::Retry(e) => e.is_exhausted(),
            _ => false,
        }
    }
}
