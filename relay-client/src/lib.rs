//! This crate provides [`RelayClient`], a wrapper around [`reqwest::Client`] that sends JSON
//! payloads with POST and retries server faults with exponential backoff, plus typed clients
//! for the two upstream APIs the relay talks to.
//!
//! You'll want to instantiate [`RelayClient`] using [`ClientBuilder`], pick a retry policy with
//! [`with_retry_policy`], finalize it with [`build`] and hand it to [`CountriesApi`] or
//! [`PostsApi`]:
//!
//! ```no_run
//! use relay_client::{ClientBuilder, CountriesApi, DEFAULT_COUNTRIES_URL};
//! use relay_retry::ExponentialBackoff;
//! use std::time::Duration;
//!
//! async fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClientBuilder::new(reqwest::Client::new())
//!         .with_retry_policy(ExponentialBackoff::new(3, Duration::from_millis(1000))?)
//!         .build();
//!     let countries = CountriesApi::new(client, DEFAULT_COUNTRIES_URL.parse()?);
//!     for country in countries.fetch_countries().await? {
//!         println!("{}", country.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`build`]: ClientBuilder::build
//! [`with_retry_policy`]: ClientBuilder::with_retry_policy
mod client;
mod countries;
mod error;
mod executor;
mod posts;
mod span;

pub use client::{ClientBuilder, RelayClient};
pub use countries::{CountriesApi, Country, COUNTRIES_QUERY, DEFAULT_COUNTRIES_URL};
pub use error::{Error, Result};
pub use executor::{failure_from_error, failure_from_status, CallRequest, HttpExecutor};
pub use posts::{CreatedPost, NewPost, PostsApi, DEFAULT_POSTS_URL};
pub use span::{ERROR_MESSAGE, HTTP_METHOD, HTTP_STATUS_CODE, HTTP_URL, OTEL_KIND};

pub use reqwest::Url;
