//! Conversational chat and language probe routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use nurture_runtime::{ChatReply, ChatRequest, LanguageProbe, LanguageProbeRequest};

use super::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/language/detect", post(detect_language))
}

/// POST /api/chat: answer a free-form question with journal context.
async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(req) = payload?;
    state
        .assistant
        .chat(req)
        .await
        .map(Json)
        .map_err(|e| ApiError::new("Failed to generate chat response", e))
}

/// POST /api/language/detect: detect the script of a text and reply in it.
async fn detect_language(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LanguageProbeRequest>, JsonRejection>,
) -> Result<Json<LanguageProbe>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.assistant.detect_language(req).await))
}
