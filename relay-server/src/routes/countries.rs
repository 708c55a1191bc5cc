use axum::{extract::State, Json};
use relay_client::Country;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{AppError, Failure};
use crate::export::write_csv;
use crate::state::AppState;

pub const CSV_SAVED: &str = "CSV file saved successfully!";

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub message: &'static str,
    pub data: Vec<Country>,
}

/// `GET /`: export every country to the CSV file and echo them back.
pub async fn export_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExportResponse>, Failure> {
    match export(&state).await {
        Ok(countries) => Ok(Json(ExportResponse {
            message: CSV_SAVED,
            data: countries,
        })),
        Err(e) => {
            error!(error = %e, "Error fetching or saving data");
            Err(Failure::Plain("Server Error"))
        }
    }
}

async fn export(state: &AppState) -> Result<Vec<Country>, AppError> {
    let countries = state.countries.fetch_countries().await?;
    write_csv(&state.csv_path, &countries).await?;
    info!(path = %state.csv_path.display(), rows = countries.len(), "CSV file saved");
    Ok(countries)
}
