//! Axum route handlers for the HTML preview.

use axum::{
    extract::{Path, State},
    response::Html,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::preview::{render_preview, render_print};
use crate::state::AppState;

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    let html = render_preview(&session.data, &session.style)
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Html(html))
}

/// GET /api/v1/sessions/:id/print
///
/// The preview document with a script that opens the print dialog on load.
pub async fn handle_print(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    let html = render_print(&session.data, &session.style)
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Html(html))
}
