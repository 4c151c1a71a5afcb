use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editor::edits::EditError;
use crate::editor::flow::FlowError;
use crate::export::ExportError;
use crate::extraction::UploadError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Extraction failed; the message is already user-facing.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Export failed: {0}")]
    Export(ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedFileType(_) => AppError::UnsupportedFileType(err.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::SessionNotFound(id) => AppError::NotFound(format!("Session {id} not found")),
            FlowError::Upload(e) => e.into(),
            FlowError::Extraction(message) => AppError::Extraction(message),
        }
    }
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::ItemNotFound { .. } => AppError::NotFound(err.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::InvalidOptions(_) => AppError::Validation(err.to_string()),
            other => AppError::Export(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFileType(msg) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_FILE_TYPE", msg.clone())
            }
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction error: {msg}");
                (StatusCode::BAD_GATEWAY, "EXTRACTION_FAILED", msg.clone())
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    "The PDF could not be generated".to_string(),
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
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_upload_maps_to_its_own_code() {
        let err: AppError = UploadError::UnsupportedFileType(".png".to_string()).into();
        assert!(matches!(err, AppError::UnsupportedFileType(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_extraction_failure_is_bad_gateway() {
        let err: AppError = FlowError::Extraction("Failed to parse extracted resume data.".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_bad_export_options_are_a_client_error() {
        let err: AppError = ExportError::InvalidOptions("scale".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        let err: AppError = ExportError::Render("empty".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_item_is_not_found() {
        let err: AppError = EditError::ItemNotFound {
            section: crate::editor::edits::Section::Skills,
            id: "x".into(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
