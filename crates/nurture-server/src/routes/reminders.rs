//! Reminder generation route.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use nurture_reminders::ReminderSet;
use nurture_runtime::ReminderRequest;

use super::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate-reminders", post(generate_reminders))
}

/// POST /api/generate-reminders: five daily reminders from recent voice logs.
async fn generate_reminders(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReminderRequest>, JsonRejection>,
) -> Result<Json<ReminderSet>, ApiError> {
    let Json(req) = payload?;
    state
        .assistant
        .reminders(req)
        .await
        .map(Json)
        .map_err(|e| ApiError::new("Failed to generate reminders", e))
}
