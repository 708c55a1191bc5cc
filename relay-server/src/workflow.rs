//! Fetch the countries, pick one and publish it as a post.

use relay_client::{CountriesApi, Country, NewPost, PostsApi};
use serde::Serialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::export::or_not_available;

pub const WORKFLOW_COMPLETED: &str = "Workflow completed successfully!";
/// Author of the posts created by the workflow.
pub const WORKFLOW_USER_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowOutcome {
    pub message: &'static str,
    pub post_id: u64,
}

/// Builds the post announcing `country`.
pub fn post_for_country(country: &Country) -> NewPost {
    NewPost {
        title: country.name.clone(),
        body: format!(
            "Capital: {}, Currency: {}",
            or_not_available(country.capital.as_deref()),
            or_not_available(country.currency.as_deref()),
        ),
        user_id: WORKFLOW_USER_ID,
    }
}

/// Publishes the first country returned by `countries` through `posts`.
pub async fn automate_workflow(
    countries: &CountriesApi,
    posts: &PostsApi,
) -> Result<WorkflowOutcome, AppError> {
    let outcome = run(countries, posts).await;
    if let Err(e) = &outcome {
        error!(error = %e, "Error during workflow execution");
    }
    outcome
}

async fn run(countries: &CountriesApi, posts: &PostsApi) -> Result<WorkflowOutcome, AppError> {
    info!(url = %countries.url(), "Fetching data from GraphQL API...");
    let countries = countries.fetch_countries().await?;

    let selected = countries.first().ok_or(AppError::NoCountries)?;
    info!(country = ?selected, "Selected country");

    let post = post_for_country(selected);

    info!(url = %posts.url(), "Posting data to REST API...");
    let created = posts.create_post(&post).await?;
    info!(post_id = created.id, "Data posted successfully!");

    Ok(WorkflowOutcome {
        message: WORKFLOW_COMPLETED,
        post_id: created.id,
    })
}
