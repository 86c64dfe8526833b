//! Web layer errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use press_core::error::PressError;
use thiserror::Error;
use tracing::error;

/// Failure while answering a request
///
/// Rejected comments and missing articles are ordinary responses; only
/// infrastructure failures end up here.
#[derive(Error, Debug)]
pub enum WebError {
    #[error(transparent)]
    Press(#[from] PressError),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        let body = serde_json::json!({
            "success": false,
            "message": "internal server error",
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
