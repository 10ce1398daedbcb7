//! Journal history route.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use nurture_runtime::HistoryResponse;

use super::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/history/{user_id}", get(history))
}

/// GET /api/history/{user_id}: profile plus the most recent entries.
async fn history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    state
        .assistant
        .history(&user_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::new("Failed to retrieve history", e))
}
