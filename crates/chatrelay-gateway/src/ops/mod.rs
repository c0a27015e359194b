//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness, with the current connection count

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::app_state::AppState;

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let connections = state.registry().len().await;
    (StatusCode::OK, format!("ok connections={connections}"))
}
