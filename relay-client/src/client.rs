use relay_retry::{ExponentialBackoff, RetryExecutor};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::executor::{CallRequest, HttpExecutor};

/// A `ClientBuilder` is used to build a [`RelayClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    client: Client,
    retry_policy: ExponentialBackoff,
}

impl ClientBuilder {
    pub fn new(client: Client) -> Self {
        ClientBuilder {
            client,
            retry_policy: ExponentialBackoff::default(),
        }
    }

    /// Backoff used for every call sent by the built client.
    pub fn with_retry_policy(mut self, retry_policy: ExponentialBackoff) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Returns a `RelayClient` using this builder configuration.
    pub fn build(self) -> RelayClient {
        RelayClient {
            executor: HttpExecutor::new(self.client),
            retry: RetryExecutor::new_with_policy(self.retry_policy),
        }
    }
}

/// `RelayClient` is a wrapper around [`reqwest::Client`] which sends every request through a
/// [`RetryExecutor`].
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct RelayClient {
    executor: HttpExecutor,
    retry: RetryExecutor,
}

impl RelayClient {
    /// See [`ClientBuilder`] for a more ergonomic way to build `RelayClient` instances.
    pub fn new(client: Client, retry_policy: ExponentialBackoff) -> Self {
        ClientBuilder::new(client)
            .with_retry_policy(retry_policy)
            .build()
    }

    pub fn retry_policy(&self) -> &ExponentialBackoff {
        self.retry.retry_policy()
    }

    /// POSTs `payload` to `url`, retrying server faults, and returns the JSON answer as-is.
    ///
    /// # Errors
    ///
    /// Fails with the terminal [`relay_retry::Error`] of the retry loop.
    pub async fn post_value(&self, url: Url, payload: Value) -> Result<Value> {
        let request = CallRequest::new(url, payload);
        Ok(self.retry.execute(&self.executor, &request).await?)
    }

    /// Serialises `body`, POSTs it to `url` with retries and decodes the answer into `R`.
    ///
    /// Retried POSTs are not deduplicated upstream: a server fault on a request that was
    /// nonetheless applied leads to the operation being applied twice.
    ///
    /// # Errors
    ///
    /// Fails if `body` cannot be serialised, if the call fails, or if the answer does not
    /// decode into `R`.
    pub async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_value(body)?;
        let answer = self.post_value(url, payload).await?;
        Ok(serde_json::from_value(answer)?)
    }
}
