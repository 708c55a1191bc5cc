use axum::{
    http::Request,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::routes::{automate, countries, health, posts};
use crate::state::AppState;

pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(countries::export_countries).post(posts::create_post),
        )
        .route("/automate", get(automate::automate))
        .route("/health", get(health::health))
}

/// The router with request tracing, ready to serve.
pub fn app(state: Arc<AppState>) -> Router {
    build_router()
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }),
        )
        .with_state(state)
}
