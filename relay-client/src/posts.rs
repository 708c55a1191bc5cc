use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::client::RelayClient;
use crate::error::Result;

/// Public posts REST endpoint.
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// The part of the created post the relay cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPost {
    pub id: u64,
}

/// Typed client for the posts REST API.
#[derive(Debug, Clone)]
pub struct PostsApi {
    client: RelayClient,
    url: Url,
}

impl PostsApi {
    pub fn new(client: RelayClient, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Creates `post` upstream.
    ///
    /// Posts are not idempotent: if a server fault hides a successful write, the retry
    /// creates a second post.
    pub async fn create_post(&self, post: &NewPost) -> Result<CreatedPost> {
        self.client.post_json(self.url.clone(), post).await
    }
}
