use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editing::session::EditError;
use crate::export::writer::ExportError;
use crate::generation::generator::GenerationError;
use crate::history::store::StoreError;
use crate::layout::LayoutError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("History store error: {0}")]
    History(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Generation(e @ GenerationError::InvalidTopic { .. }) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Generation(e @ GenerationError::GenerationFailed(_)) => {
                tracing::error!("Generation error: {e}");
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", e.to_string())
            }
            AppError::Edit(e) => {
                let code = match e {
                    EditError::EmptyEditRejected(_) => "EMPTY_EDIT_REJECTED",
                    EditError::NotEditing => "NOT_EDITING",
                    EditError::EditInProgress { .. } => "EDIT_IN_PROGRESS",
                };
                let status = match e {
                    EditError::EmptyEditRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::CONFLICT,
                };
                (status, code, e.to_string())
            }
            AppError::Layout(e) => {
                tracing::error!("Layout error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_GEOMETRY", e.to_string())
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED", e.to_string())
            }
            AppError::History(e) => {
                tracing::error!("History store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "HISTORY_ERROR",
                    "Topic history is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
