//! Axum router wiring (HTTP -> WS upgrade).
//!
//! The relay accepts upgrades on `/` and `/v1/ws`; `/healthz` is plain HTTP.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(transport::ws::ws_upgrade))
        .route("/v1/ws", get(transport::ws::ws_upgrade))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
