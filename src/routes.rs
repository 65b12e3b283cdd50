//! Event API consumed by the dashboard page

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::presentation::DomUpdate;
use crate::session::{Reaction, Session, UiEvent};

#[derive(Debug, Serialize, Deserialize)]
pub struct Bootstrap {
    /// Applied by the page while a load is in flight
    pub loading: Vec<DomUpdate>,
    /// Last rendered dashboard, empty before the first load
    pub dashboard: Vec<DomUpdate>,
}

pub fn router() -> Router<Arc<Session>> {
    Router::new()
        .route("/bootstrap", get(bootstrap))
        .route("/state", get(state))
        .route("/events", post(handle_event))
        .route("/health", get(health))
}

async fn bootstrap(State(session): State<Arc<Session>>) -> Json<Bootstrap> {
    Json(Bootstrap {
        loading: session.loading_updates(),
        dashboard: session.last_render().await,
    })
}

async fn state(State(session): State<Arc<Session>>) -> Json<Vec<DomUpdate>> {
    Json(session.last_render().await)
}

/// Load failures travel back as error banner updates, never as HTTP errors
async fn handle_event(
    State(session): State<Arc<Session>>,
    Json(event): Json<UiEvent>,
) -> Json<Reaction> {
    Json(session.dispatch(event).await)
}

async fn health() -> &'static str {
    "ok"
}
