//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /health
//!   POST   /repositories
//!   GET    /repositories
//!   POST   /repositories/{id}/targets

pub mod config;
pub mod error;
pub mod handlers;

use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

pub use config::ServerConfig;
pub use error::ApiError;
pub use handlers::AppState;

/// Build the application router.
///
/// Every request is traced and bounded by `request_timeout`.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/repositories",
            post(handlers::repositories::create).get(handlers::repositories::list),
        )
        .route("/repositories/:id/targets", post(handlers::targets::create))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(config: ServerConfig, pool: db::DbPool) -> anyhow::Result<()> {
    let app = router(AppState::new(pool), config.request_timeout);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
