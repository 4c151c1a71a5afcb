//! Axum route handler for PDF download.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{export_filename, export_pdf, ExportOptions};
use crate::state::AppState;

/// GET /api/v1/sessions/:id/export.pdf
///
/// Query: `pageSize` (a4 | letter), `marginPt`, `scale`, `title`; all optional.
/// Responds with the document as an attachment named after the candidate.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(options): Query<ExportOptions>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;

    let filename = export_filename(&session.data.personal_info.full_name);
    let bytes = tokio::task::spawn_blocking(move || {
        export_pdf(&session.data, &session.style, &options)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    tracing::info!("Session {id}: sending {filename}");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
