use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Upstream(#[from] relay_client::Error),
    #[error("No countries found!")]
    NoCountries,
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What a failed route answers. Details stay in the logs; every variant is a 500.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Fixed plain-text body.
    Plain(&'static str),
    /// `{"error": message}`.
    Json(String),
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        match self {
            Failure::Plain(body) => (StatusCode::INTERNAL_SERVER_ERROR, body).into_response(),
            Failure::Json(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}
