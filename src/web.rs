//! Web server for the dashboard page

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::routes;
use crate::session::Session;

/// Build the full application: the event API under `/api`, the page itself
/// from `static_dir`. Requests running past `request_timeout` get a 408.
pub fn app(session: Arc<Session>, static_dir: &str, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors)
        .with_state(session)
}

pub async fn run(
    session: Arc<Session>,
    port: u16,
    static_dir: &str,
    request_timeout: Duration,
) -> Result<()> {
    let app = app(session, static_dir, request_timeout);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Dashboard running at http://localhost:{}", port);

    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}
