mod routes;

pub use routes::create_router;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use daybrief_core::{DaybriefError, PromptProxy};
use serde::Serialize;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<PromptProxy>,
    pub model: String,
    pub start_time: std::time::Instant,
}

/// Failure envelope: every error response is `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error type for HTTP handlers. Maps the core taxonomy onto the wire
/// contract: validation failures are the caller's fault (400), everything
/// else — missing credential, upstream, generation, retries exhausted — is a
/// 500.
pub struct ApiError(DaybriefError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<DaybriefError> for ApiError {
    fn from(err: DaybriefError) -> Self {
        Self(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
