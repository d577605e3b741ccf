use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::remote::RemoteError;

/// Handler-boundary error. Anything a handler does not deal with inline
/// becomes a response carrying the remote error's own message text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Remote(RemoteError::Transport(_))
            | AppError::Remote(RemoteError::Service { .. }) => StatusCode::BAD_GATEWAY,
            AppError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!("remote call failed: {message}");
        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}
