//! Editor/Viewer: the one session over the resume record.
//!
//! `Viewing` shows the committed record. `Editing` carries a draft copy that
//! only reaches the record (and storage) through `submit`. Leaving edit mode
//! any other way discards the draft.

pub mod handlers;
pub mod pages;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::resume::{FieldError, FieldPath, ListName, ResumeRecord};
use crate::store::ResumeStore;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Not editing: request edit mode first")]
    NotEditing,

    #[error("Already editing")]
    AlreadyEditing,

    #[error(transparent)]
    Field(#[from] FieldError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Viewing,
    Editing { draft: ResumeRecord },
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub persisted: bool,
    pub warning: Option<String>,
}

pub struct Editor {
    record: ResumeRecord,
    mode: EditorMode,
    store: ResumeStore,
}

impl Editor {
    /// Loads the record from `store` and starts in `Viewing`.
    pub async fn open(store: ResumeStore) -> Self {
        let (record, outcome) = store.load().await;
        info!("Editor opened ({outcome:?}) on {} storage", store.backend_name());
        Self {
            record,
            mode: EditorMode::Viewing,
            store,
        }
    }

    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    pub fn draft(&self) -> Option<&ResumeRecord> {
        match &self.mode {
            EditorMode::Editing { draft } => Some(draft),
            EditorMode::Viewing => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Editing { .. })
    }

    pub fn mode_name(&self) -> &'static str {
        match self.mode {
            EditorMode::Viewing => "viewing",
            EditorMode::Editing { .. } => "editing",
        }
    }

    pub fn begin_edit(&mut self) -> Result<(), EditorError> {
        if self.is_editing() {
            return Err(EditorError::AlreadyEditing);
        }
        self.mode = EditorMode::Editing {
            draft: self.record.clone(),
        };
        debug!("Entered edit mode");
        Ok(())
    }

    /// Drops the draft. Nothing is written.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        if !self.is_editing() {
            return Err(EditorError::NotEditing);
        }
        self.mode = EditorMode::Viewing;
        debug!("Left edit mode, draft discarded");
        Ok(())
    }

    /// The single Edit button: enters edit mode, or leaves it discarding the draft.
    pub fn toggle(&mut self) {
        if self.is_editing() {
            self.mode = EditorMode::Viewing;
            debug!("Toggled out of edit mode, draft discarded");
        } else {
            self.mode = EditorMode::Editing {
                draft: self.record.clone(),
            };
            debug!("Toggled into edit mode");
        }
    }

    fn draft_mut(&mut self) -> Result<&mut ResumeRecord, EditorError> {
        match &mut self.mode {
            EditorMode::Editing { draft } => Ok(draft),
            EditorMode::Viewing => Err(EditorError::NotEditing),
        }
    }

    pub fn set_field(&mut self, path: &str, value: impl Into<String>) -> Result<(), EditorError> {
        let path: FieldPath = path.parse()?;
        self.draft_mut()?.set_field(&path, value.into())?;
        debug!("Draft field {path} updated");
        Ok(())
    }

    /// Returns the index of the new, empty entry.
    pub fn append_item(&mut self, list: &str) -> Result<usize, EditorError> {
        let list: ListName = list.parse()?;
        let index = self.draft_mut()?.append_item(list);
        debug!("Appended {list}.{index} to draft");
        Ok(index)
    }

    pub fn remove_item(&mut self, list: &str, index: usize) -> Result<(), EditorError> {
        let list: ListName = list.parse()?;
        self.draft_mut()?.remove_item(list, index)?;
        debug!("Removed {list}.{index} from draft");
        Ok(())
    }

    /// Applies the `(path, value)` pairs of a form post, in order.
    /// Either every pair applies or the draft is left as it was.
    pub fn apply_form<I, K, V>(&mut self, fields: I) -> Result<(), EditorError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let draft = self.draft_mut()?;
        let mut staged = draft.clone();
        let mut applied = 0;
        for (path, value) in fields {
            let path: FieldPath = path.as_ref().parse()?;
            staged.set_field(&path, value.into())?;
            applied += 1;
        }
        *draft = staged;
        debug!("Applied {applied} form fields to draft");
        Ok(())
    }

    /// Commits the draft as the displayed record and writes it in full.
    ///
    /// A failed write keeps the commit in memory and reports a warning.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, EditorError> {
        let draft = match std::mem::replace(&mut self.mode, EditorMode::Viewing) {
            EditorMode::Editing { draft } => draft,
            EditorMode::Viewing => return Err(EditorError::NotEditing),
        };

        let outcome = match self.store.save(&draft).await {
            Ok(()) => SubmitOutcome {
                persisted: true,
                warning: None,
            },
            Err(e) => {
                warn!("Submit applied in memory only: {e}");
                SubmitOutcome {
                    persisted: false,
                    warning: Some(format!(
                        "Your changes are shown but could not be saved: {e}"
                    )),
                }
            }
        };

        self.record = draft;
        Ok(outcome)
    }
}
