use axum::{extract::State, Json};
use std::sync::Arc;

use crate::error::Failure;
use crate::state::AppState;
use crate::workflow::{automate_workflow, WorkflowOutcome};

/// `GET /automate`: run the country-to-post workflow.
pub async fn automate(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WorkflowOutcome>, Failure> {
    automate_workflow(&state.countries, &state.posts)
        .await
        .map(Json)
        .map_err(|e| Failure::Json(e.to_string()))
}
