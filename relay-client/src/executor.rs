use anyhow::anyhow;
use relay_retry::{CallFailure, Executor};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::Instrument;

use crate::span;

/// A single outbound POST: the destination and its JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    pub url: Url,
    pub payload: Value,
}

impl CallRequest {
    pub fn new(url: Url, payload: Value) -> Self {
        Self { url, payload }
    }
}

/// [`Executor`] that POSTs the payload as JSON and returns the JSON body of a 2xx answer.
#[derive(Debug, Clone, Default)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, request: &CallRequest) -> Result<Value, CallFailure> {
        let response = self
            .client
            .post(request.url.clone())
            .json(&request.payload)
            .send()
            .await
            .map_err(failure_from_error)?;

        let status = response.status();
        span::record_status(&tracing::Span::current(), status);
        if !status.is_success() {
            return Err(failure_from_status(status));
        }

        response.json::<Value>().await.map_err(failure_from_error)
    }
}

#[async_trait::async_trait]
impl Executor for HttpExecutor {
    type Request = CallRequest;
    type Response = Value;

    async fn call(&self, request: &CallRequest) -> Result<Value, CallFailure> {
        let request_span = span::outbound_span(&request.url);

        let outcome_future = async {
            let outcome = self.send(request).await;
            if let Err(failure) = &outcome {
                span::record_failure(&tracing::Span::current(), failure);
            }
            outcome
        };

        outcome_future.instrument(request_span).await
    }
}

/// Classifies an error status answered by the remote party.
///
/// Only 403 and 500 carry a classification; every other status is an
/// opaque failure.
pub fn failure_from_status(status: StatusCode) -> CallFailure {
    let message = format!("Request failed with status code {}", status.as_u16());
    match status {
        StatusCode::FORBIDDEN => CallFailure::rejection(status, message),
        StatusCode::INTERNAL_SERVER_ERROR => CallFailure::server_fault(status, message),
        _ => CallFailure::Other(anyhow!(message)),
    }
}

/// Classifies a transport-level error.
///
/// Connection errors, timeouts and undecodable bodies are opaque failures; an
/// error that still carries a status is classified like the status itself.
pub fn failure_from_error(error: reqwest::Error) -> CallFailure {
    match error.status() {
        Some(status) => failure_from_status(status),
        None => CallFailure::Other(anyhow::Error::new(error)),
    }
}
