//! Symptom monitoring route.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use nurture_runtime::{MonitorRequest, MonitorResponse};

use super::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/monitor", post(monitor))
}

/// POST /api/monitor: classify symptoms and escalate if needed.
async fn monitor(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MonitorRequest>, JsonRejection>,
) -> Result<Json<MonitorResponse>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.assistant.monitor(req)))
}
