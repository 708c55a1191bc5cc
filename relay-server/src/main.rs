use anyhow::Context;
use std::sync::Arc;

use relay_server::{app, settings::Settings, shutdown, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env().context("Invalid configuration")?;

    telemetry::init(&settings.log_filter);

    let state = AppState::from_settings(&settings).context("HTTP client init failed")?;
    let app = app::app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_addr))?;

    tracing::info!(
        bind_addr = %settings.bind_addr,
        max_attempts = settings.retry_policy.max_attempts,
        base_delay = ?settings.retry_policy.base_delay,
        "Server running at http://localhost:{}/",
        settings.bind_addr.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown())
        .await
        .context("Server error")?;

    Ok(())
}
