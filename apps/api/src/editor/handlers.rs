//! Axum route handlers for the session / editor API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::editor::edits::{self, PersonalInfoUpdate, Section, StyleUpdate};
use crate::editor::flow::{process_upload, UploadInput};
use crate::editor::session::EditorSession;
use crate::errors::AppError;
use crate::extraction::UploadError;
use crate::models::defaults::{presets, Presets};
use crate::models::{CareerFocus, ResumeData, ResumeStyle};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerFocusRequest {
    pub career_focus: CareerFocus,
}

/// Textarea body for certifications and awards.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemResponse {
    pub item_id: String,
    pub data: ResumeData,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

/// Applies a record-level edit under the store lock and returns the new record.
async fn edit_data(
    state: &AppState,
    id: Uuid,
    edit: impl FnOnce(&ResumeData) -> Result<ResumeData, AppError>,
) -> Result<Json<ResumeData>, AppError> {
    let data = state
        .sessions
        .update(id, |s| {
            let next = edit(&s.data)?;
            s.replace_data(next.clone());
            Ok::<_, AppError>(next)
        })
        .await
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(data))
}

async fn edit_session(
    state: &AppState,
    id: Uuid,
    edit: impl FnOnce(&mut EditorSession),
) -> Result<Json<EditorSession>, AppError> {
    let session = state
        .sessions
        .update(id, |s| {
            edit(s);
            s.clone()
        })
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(session))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/presets
pub async fn handle_presets() -> Json<Presets> {
    Json(presets())
}

/// POST /api/v1/sessions
///
/// New session on the upload screen with the sample record loaded.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<EditorSession>) {
    let session = state.sessions.create().await;
    tracing::info!("Created session {}", session.id);
    (StatusCode::CREATED, Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditorSession>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// POST /api/v1/sessions/:id/career-focus
pub async fn handle_set_career_focus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CareerFocusRequest>,
) -> Result<Json<EditorSession>, AppError> {
    edit_session(&state, id, |s| s.set_career_focus(request.career_focus)).await
}

/// POST /api/v1/sessions/:id/upload
///
/// Multipart form: `file` (required), `career_focus` (optional).
/// On success the session is returned on the editor view. On extraction
/// failure the message is stored on the session and returned as 502.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<EditorSession>, AppError> {
    let mut file: Option<(String, Option<String>, bytes::Bytes)> = None;
    let mut career_focus = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                file = Some((file_name, content_type, bytes));
            }
            Some("career_focus") | Some("careerFocus") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read field: {e}")))?;
                let focus = text.parse::<CareerFocus>().map_err(AppError::Validation)?;
                career_focus = Some(focus);
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) = file.ok_or(UploadError::MissingFile)?;
    let input = UploadInput {
        file_name,
        content_type,
        bytes,
        career_focus,
    };

    let session = process_upload(
        &state.sessions,
        state.extractor.as_ref(),
        id,
        input,
        state.config.max_upload_bytes,
    )
    .await?;
    Ok(Json(session))
}

/// POST /api/v1/sessions/:id/start-manually
pub async fn handle_start_manually(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditorSession>, AppError> {
    edit_session(&state, id, EditorSession::start_manually).await
}

/// POST /api/v1/sessions/:id/start-over
pub async fn handle_start_over(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditorSession>, AppError> {
    edit_session(&state, id, EditorSession::start_over).await
}

/// POST /api/v1/sessions/:id/dismiss-error
pub async fn handle_dismiss_error(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditorSession>, AppError> {
    edit_session(&state, id, EditorSession::dismiss_error).await
}

/// PUT /api/v1/sessions/:id/resume
///
/// Whole-record replacement. Missing ids are back-filled.
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut data): Json<ResumeData>,
) -> Result<Json<ResumeData>, AppError> {
    crate::extraction::normalize::normalize(&mut data, chrono::Utc::now().timestamp_millis());
    edit_data(&state, id, move |_| Ok(data)).await
}

/// PATCH /api/v1/sessions/:id/resume/personal-info
pub async fn handle_update_personal_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<PersonalInfoUpdate>,
) -> Result<Json<ResumeData>, AppError> {
    edit_data(&state, id, |data| Ok(edits::update_personal_info(data, update))).await
}

/// POST /api/v1/sessions/:id/resume/{section}
///
/// Registered once per section; see `routes::section_routes`.
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    section: Section,
) -> Result<(StatusCode, Json<AddItemResponse>), AppError> {
    let response = state
        .sessions
        .update(id, |s| {
            let (data, item_id) = edits::add_item(&s.data, section);
            s.replace_data(data.clone());
            AddItemResponse { item_id, data }
        })
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PATCH /api/v1/sessions/:id/resume/{section}/:item_id
///
/// Body fields depend on the section, e.g. `descriptionText` for experience
/// bullets or `itemsText` for comma-separated skills.
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, String)>,
    section: Section,
    body: Value,
) -> Result<Json<ResumeData>, AppError> {
    edit_data(&state, id, |data| {
        Ok(edits::update_item(data, section, &item_id, body)?)
    })
    .await
}

/// DELETE /api/v1/sessions/:id/resume/{section}/:item_id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, String)>,
    section: Section,
) -> Result<Json<ResumeData>, AppError> {
    edit_data(&state, id, |data| {
        Ok(edits::remove_item(data, section, &item_id)?)
    })
    .await
}

/// PUT /api/v1/sessions/:id/resume/certifications
pub async fn handle_set_certifications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TextRequest>,
) -> Result<Json<ResumeData>, AppError> {
    edit_data(&state, id, |data| Ok(edits::set_certifications(data, &request.text))).await
}

/// PUT /api/v1/sessions/:id/resume/awards
pub async fn handle_set_awards(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TextRequest>,
) -> Result<Json<ResumeData>, AppError> {
    edit_data(&state, id, |data| Ok(edits::set_awards(data, &request.text))).await
}

/// PUT /api/v1/sessions/:id/style
pub async fn handle_replace_style(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(style): Json<ResumeStyle>,
) -> Result<Json<ResumeStyle>, AppError> {
    let style = edits::replace_style(style)?;
    let stored = style.clone();
    state
        .sessions
        .update(id, move |s| s.replace_style(stored))
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(style))
}

/// PATCH /api/v1/sessions/:id/style
pub async fn handle_update_style(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<StyleUpdate>,
) -> Result<Json<ResumeStyle>, AppError> {
    let style = state
        .sessions
        .update(id, |s| {
            let next = edits::update_style(&s.style, update)?;
            s.replace_style(next.clone());
            Ok::<_, AppError>(next)
        })
        .await
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(style))
}
