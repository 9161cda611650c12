use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use common::prelude::{ProviderError, SharingError};

/// Error returned by every API handler.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Sharing(#[from] SharingError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HandlerError::Sharing(err) => match err {
                SharingError::Forbidden | SharingError::PrivilegeEscalation(_) => {
                    StatusCode::FORBIDDEN
                }
                SharingError::NotFound(_) => StatusCode::NOT_FOUND,
                SharingError::Validation(_) => StatusCode::BAD_REQUEST,
                SharingError::Store(ProviderError::NotFound(_)) => StatusCode::NOT_FOUND,
                SharingError::Store(ProviderError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
                SharingError::Store(_) | SharingError::IncompleteDelete { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                SharingError::Cancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "request failed: {}", self);
        } else {
            tracing::debug!(%status, "request rejected: {}", self);
        }

        let msg = serde_json::json!({"msg": self.to_string()});
        (status, Json(msg)).into_response()
    }
}
