use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::GenerationError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Topic is required")]
    MissingTopic,

    #[error("Unsupported format '{0}'. Use 'pdf' or 'ppt'.")]
    InvalidFormat(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    GenerationFailed(String),

    #[error("{0}")]
    InvalidModelOutput(String),

    #[error("Error rendering document: {0}")]
    RenderingFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::MissingTopic => (StatusCode::BAD_REQUEST, "MISSING_TOPIC"),
            AppError::InvalidFormat(_) => (StatusCode::BAD_REQUEST, "INVALID_FORMAT"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::GenerationFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_FAILED"),
            AppError::InvalidModelOutput(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_MODEL_OUTPUT")
            }
            AppError::RenderingFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RENDERING_FAILED"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Failed(_) => AppError::GenerationFailed(err.to_string()),
            GenerationError::InvalidOutput(msg) => AppError::InvalidModelOutput(msg),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::RenderingFailed(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            other if status.is_server_error() => {
                tracing::error!("{code}: {other}");
                other.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
