use std::sync::Arc;

use tokio::sync::Mutex;

use crate::editor::Editor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editor session. Each request holds the lock for its whole
    /// operation, so edits apply one at a time in arrival order.
    pub editor: Arc<Mutex<Editor>>,
    /// Backend name reported by `/health`.
    pub storage_backend: &'static str,
}

impl AppState {
    pub fn new(editor: Editor, storage_backend: &'static str) -> Self {
        Self {
            editor: Arc::new(Mutex::new(editor)),
            storage_backend,
        }
    }
}
