//! HTTP route handlers: the assistant API consumed by the web backend.

pub mod chat;
pub mod error;
pub mod guidance;
pub mod history;
pub mod monitor;
pub mod reminders;
pub mod status;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(monitor::routes())
        .merge(guidance::routes())
        .merge(chat::routes())
        .merge(history::routes())
        .merge(reminders::routes())
}
