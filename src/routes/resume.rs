//! Read-only endpoints: resume and health.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::state::AppState;

/// `GET /api/resume`: the resume document as loaded at startup.
pub async fn resume(State(state): State<AppState>) -> Json<Value> {
    Json(state.resume.data().clone())
}

/// `GET /api/health`.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// `GET /healthz`: bare liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
