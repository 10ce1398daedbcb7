//! JSON error responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

/// `{"error", "message"}` with 400 for caller mistakes and 500 otherwise.
pub struct ApiError {
    status: StatusCode,
    error: String,
    message: String,
}

impl ApiError {
    /// Wrap a service error under a short description of what failed.
    pub fn new(context: &str, err: nurture_core::Error) -> Self {
        let status = if err.is_client_error() {
            warn!("{}: {}", context, err);
            StatusCode::BAD_REQUEST
        } else {
            error!("{}: {}", context, err);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            error: context.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Invalid request body".into(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({
                "error": self.error,
                "message": self.message,
            })),
        )
            .into_response()
    }
}
