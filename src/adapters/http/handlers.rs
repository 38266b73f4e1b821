//! Request handlers. Thin: extract, call the intake port, compose.

use super::router::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header::AUTHORIZATION},
    response::Response,
};
use serde_json::Value;
use tracing::{debug, warn};

/// `POST /api/contact`. Unparseable bodies are treated as an empty payload so they fail
/// validation (400) instead of producing framework rejection codes.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "contact body not usable as JSON");
            Value::Null
        }
    };

    match state.intake.submit(&payload).await {
        Ok(record) => state.composer.created(&record),
        Err(e) => state.composer.failure(&e),
    }
}

/// `GET /api/contacts`. Newest first, capped.
pub async fn list_contacts(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !state.auth.authorize(bearer_token(&headers)) {
        warn!("unauthorized admin list request");
        return state.composer.unauthorized();
    }
    match state.intake.recent().await {
        Ok(records) => state.composer.list(&records),
        Err(e) => state.composer.failure(&e),
    }
}

/// `GET /api/contacts/stats`. Counts by status.
pub async fn contact_stats(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !state.auth.authorize(bearer_token(&headers)) {
        warn!("unauthorized admin stats request");
        return state.composer.unauthorized();
    }
    match state.intake.stats().await {
        Ok(counts) => state.composer.stats(counts),
        Err(e) => state.composer.failure(&e),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}
