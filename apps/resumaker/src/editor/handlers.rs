//! Axum route handlers for the Editor JSON API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::editor::Editor;
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EditorSnapshot {
    pub mode: &'static str,
    pub record: ResumeRecord,
    pub draft: Option<ResumeRecord>,
}

impl From<&Editor> for EditorSnapshot {
    fn from(editor: &Editor) -> Self {
        Self {
            mode: editor.mode_name(),
            record: editor.record().clone(),
            draft: editor.draft().cloned(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub path: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct AppendItemResponse {
    pub index: usize,
    pub editor: EditorSnapshot,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub record: ResumeRecord,
    pub persisted: bool,
    pub warning: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeRecord> {
    let editor = state.editor.lock().await;
    Json(editor.record().clone())
}

/// GET /api/v1/editor
pub async fn handle_get_editor(State(state): State<AppState>) -> Json<EditorSnapshot> {
    let editor = state.editor.lock().await;
    Json(EditorSnapshot::from(&*editor))
}

/// POST /api/v1/editor/edit
pub async fn handle_begin_edit(
    State(state): State<AppState>,
) -> Result<Json<EditorSnapshot>, AppError> {
    let mut editor = state.editor.lock().await;
    editor.begin_edit()?;
    Ok(Json(EditorSnapshot::from(&*editor)))
}

/// PATCH /api/v1/editor/field
pub async fn handle_set_field(
    State(state): State<AppState>,
    Json(req): Json<SetFieldRequest>,
) -> Result<Json<EditorSnapshot>, AppError> {
    let mut editor = state.editor.lock().await;
    editor.set_field(&req.path, req.value)?;
    Ok(Json(EditorSnapshot::from(&*editor)))
}

/// POST /api/v1/editor/items/:list
pub async fn handle_append_item(
    State(state): State<AppState>,
    Path(list): Path<String>,
) -> Result<Json<AppendItemResponse>, AppError> {
    let mut editor = state.editor.lock().await;
    let index = editor.append_item(&list)?;
    Ok(Json(AppendItemResponse {
        index,
        editor: EditorSnapshot::from(&*editor),
    }))
}

/// DELETE /api/v1/editor/items/:list/:index
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((list, index)): Path<(String, usize)>,
) -> Result<Json<EditorSnapshot>, AppError> {
    let mut editor = state.editor.lock().await;
    editor.remove_item(&list, index)?;
    Ok(Json(EditorSnapshot::from(&*editor)))
}

/// POST /api/v1/editor/submit
pub async fn handle_submit(
    State(state): State<AppState>,
) -> Result<Json<SubmitResponse>, AppError> {
    let mut editor = state.editor.lock().await;
    let outcome = editor.submit().await?;
    Ok(Json(SubmitResponse {
        record: editor.record().clone(),
        persisted: outcome.persisted,
        warning: outcome.warning,
    }))
}

/// POST /api/v1/editor/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
) -> Result<Json<EditorSnapshot>, AppError> {
    let mut editor = state.editor.lock().await;
    editor.cancel()?;
    Ok(Json(EditorSnapshot::from(&*editor)))
}
