use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::client::RelayClient;
use crate::error::{Error, Result};

/// Public countries GraphQL endpoint.
pub const DEFAULT_COUNTRIES_URL: &str = "https://countries.trevorblades.com/";

/// Selects the fields exported by the relay for every country.
pub const COUNTRIES_QUERY: &str = r#"
{
  countries {
    name
    capital
    currency
  }
}"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub capital: Option<String>,
    pub currency: Option<String>,
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct CountriesData {
    countries: Vec<Country>,
}

/// Typed client for the countries GraphQL API.
#[derive(Debug, Clone)]
pub struct CountriesApi {
    client: RelayClient,
    url: Url,
}

impl CountriesApi {
    pub fn new(client: RelayClient, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Runs [`COUNTRIES_QUERY`] and returns every country in the answer.
    pub async fn fetch_countries(&self) -> Result<Vec<Country>> {
        let request = GraphqlRequest {
            query: COUNTRIES_QUERY,
        };
        let response: GraphqlResponse<CountriesData> =
            self.client.post_json(self.url.clone(), &request).await?;

        match response.data {
            Some(data) => Ok(data.countries),
            None if !response.errors.is_empty() => {
                let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
                Err(Error::Graphql(messages.join("; ")))
            }
            None => Err(Error::MissingData),
        }
    }
}
