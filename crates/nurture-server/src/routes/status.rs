//! Service status route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(status))
}

/// GET /api/status: generation provider and supported languages.
async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let status = state.assistant.status();
    Json(serde_json::json!({
        "status": "ok",
        "port": state.config.port,
        "provider": status.provider,
        "backend_available": status.backend_available,
        "model": status.model,
        "supported_languages": status.supported_languages,
    }))
}
