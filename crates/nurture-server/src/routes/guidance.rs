//! Guidance routes: daily-log, voice-transcript and basic guidance.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use nurture_runtime::{
    BasicGuidance, GuidanceRequest, GuidanceResponse, VoiceGuidanceRequest, VoiceGuidanceResponse,
};

use super::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/guidance", post(guidance))
        .route("/guidance/basic", get(basic_guidance))
        .route("/voice-guidance", post(voice_guidance))
}

#[derive(serde::Deserialize)]
struct BasicQuery {
    week: Option<u32>,
}

/// POST /api/guidance: save today's log and return personalized guidance.
async fn guidance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GuidanceRequest>, JsonRejection>,
) -> Result<Json<GuidanceResponse>, ApiError> {
    let Json(req) = payload?;
    state
        .assistant
        .guidance(req)
        .await
        .map(Json)
        .map_err(|e| ApiError::new("Failed to generate guidance", e))
}

/// POST /api/voice-guidance: guidance from a voice transcript.
async fn voice_guidance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VoiceGuidanceRequest>, JsonRejection>,
) -> Result<Json<VoiceGuidanceResponse>, ApiError> {
    let Json(req) = payload?;
    state
        .assistant
        .voice_guidance(req)
        .await
        .map(Json)
        .map_err(|e| ApiError::new("Failed to process voice guidance", e))
}

/// GET /api/guidance/basic?week=N
async fn basic_guidance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BasicQuery>,
) -> Json<BasicGuidance> {
    Json(state.assistant.basic_guidance(query.week))
}
