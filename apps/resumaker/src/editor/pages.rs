//! HTML page handlers. Every mutating route answers with a redirect back to
//! `/`, except a submit whose write failed and a form post that arrives after
//! the edit session ended; both render the page with a notice inline.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::editor::Editor;
use crate::errors::AppError;
use crate::render::render_page;
use crate::state::AppState;

/// Form posts arrive as ordered `(field path, value)` pairs.
type FormFields = Vec<(String, String)>;

const SESSION_ENDED: &str =
    "This edit session has already ended, so the form was not applied. Press Edit to start again.";

/// The page for a form post when the editor is no longer editing.
fn stale_form(editor: &Editor) -> Option<Response> {
    (!editor.is_editing()).then(|| Html(render_page(editor, Some(SESSION_ENDED))).into_response())
}

/// GET /
pub async fn handle_page(State(state): State<AppState>) -> Html<String> {
    let editor = state.editor.lock().await;
    Html(render_page(&editor, None))
}

/// POST /toggle
pub async fn handle_toggle(State(state): State<AppState>) -> Redirect {
    state.editor.lock().await.toggle();
    Redirect::to("/")
}

/// POST /form/submit
pub async fn handle_form_submit(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let mut editor = state.editor.lock().await;
    if let Some(page) = stale_form(&editor) {
        return Ok(page);
    }
    editor.apply_form(fields)?;
    let outcome = editor.submit().await?;

    Ok(match outcome.warning {
        Some(warning) => Html(render_page(&editor, Some(warning.as_str()))).into_response(),
        None => Redirect::to("/").into_response(),
    })
}

/// POST /form/cancel
pub async fn handle_form_cancel(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut editor = state.editor.lock().await;
    if let Some(page) = stale_form(&editor) {
        return Ok(page);
    }
    editor.cancel()?;
    Ok(Redirect::to("/").into_response())
}

/// POST /form/items/:list/add
pub async fn handle_form_add(
    State(state): State<AppState>,
    Path(list): Path<String>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let mut editor = state.editor.lock().await;
    if let Some(page) = stale_form(&editor) {
        return Ok(page);
    }
    editor.apply_form(fields)?;
    editor.append_item(&list)?;
    Ok(Redirect::to("/").into_response())
}

/// POST /form/items/:list/:index/remove
pub async fn handle_form_remove(
    State(state): State<AppState>,
    Path((list, index)): Path<(String, usize)>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let mut editor = state.editor.lock().await;
    if let Some(page) = stale_form(&editor) {
        return Ok(page);
    }
    editor.apply_form(fields)?;
    editor.remove_item(&list, index)?;
    Ok(Redirect::to("/").into_response())
}
