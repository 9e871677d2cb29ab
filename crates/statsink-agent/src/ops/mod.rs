//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/stats`   : JSON snapshot of all tracked stats
//! - `/flush`   : force a push cycle to the sink

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::time::Duration;

use statsink_core::error::StatsError;

use crate::app_state::AppState;

const STATS_TIMEOUT: Duration = Duration::from_millis(500);

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn stats(State(state): State<AppState>) -> Response {
    match state.stats().get_stats(STATS_TIMEOUT).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn flush(State(state): State<AppState>) -> Response {
    match state.stats().flush(STATS_TIMEOUT).await {
        Ok(events) => (StatusCode::OK, Json(json!({ "events": events }))).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: StatsError) -> Response {
    let status = match e {
        StatsError::TimedOut => StatusCode::GATEWAY_TIMEOUT,
        StatsError::NotTracked | StatsError::Closed => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = json!({ "code": e.code().as_str(), "msg": e.to_string() });
    (status, Json(body)).into_response()
}
