//! API error type and HTTP status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use aulario_core::AularioError;
use aulario_identity::SignatureError;
use aulario_sync::SyncError;

/// Error type for API handlers.
///
/// Everything the services raise is already in the shared taxonomy;
/// `Unauthorized` exists only for the webhook signature gate, which
/// rejects a delivery before any service runs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Webhook delivery failed signature verification.
    #[error("Webhook rejected: {0}")]
    Unauthorized(#[from] SignatureError),

    /// A service operation failed.
    #[error(transparent)]
    Domain(#[from] AularioError),
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        Self::Domain(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(err) => {
                tracing::warn!(error = %err, "Webhook signature rejected");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "type": "unauthorized",
                        "message": err.to_string(),
                    })),
                )
                    .into_response()
            }
            ApiError::Domain(err) => {
                let status = match &err {
                    AularioError::Validation { .. } => StatusCode::BAD_REQUEST,
                    AularioError::Conflict { .. } => StatusCode::CONFLICT,
                    AularioError::NotFound { .. } => StatusCode::NOT_FOUND,
                    AularioError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
                    AularioError::PartialFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    tracing::error!(error = %err, "Request failed");
                }
                (status, Json(err)).into_response()
            }
        }
    }
}
