use axum::{extract::State, Json};
use relay_client::{CreatedPost, NewPost};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::Failure;
use crate::state::AppState;

/// `POST /`: forward the post upstream and answer with its id.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(post): Json<NewPost>,
) -> Result<Json<CreatedPost>, Failure> {
    info!(?post, "Received POST data");

    match state.posts.create_post(&post).await {
        Ok(created) => Ok(Json(created)),
        Err(e) => {
            error!(error = %e, "POST request failed");
            Err(Failure::Plain("Failed to create post."))
        }
    }
}
