use std::path::PathBuf;
use std::time::Duration;

use relay_client::{ClientBuilder, CountriesApi, PostsApi};

use crate::settings::Settings;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct AppState {
    pub countries: CountriesApi,
    pub posts: PostsApi,
    pub csv_path: PathBuf,
}

impl AppState {
    pub fn new(countries: CountriesApi, posts: PostsApi, csv_path: PathBuf) -> Self {
        Self {
            countries,
            posts,
            csv_path,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(settings.http_timeout)
            .build()?;

        let client = ClientBuilder::new(http)
            .with_retry_policy(settings.retry_policy)
            .build();

        Ok(Self::new(
            CountriesApi::new(client.clone(), settings.countries_url.clone()),
            PostsApi::new(client, settings.posts_url.clone()),
            settings.csv_path.clone(),
        ))
    }
}
