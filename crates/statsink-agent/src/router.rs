//! Axum router wiring for the ops endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/stats", get(ops::stats))
        .route("/flush", post(ops::flush))
        .with_state(state)
}
