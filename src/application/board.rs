// src/application/board.rs
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{MediaResolver, NoteCreator, NoteLister, NoteRepository, Submission};
use crate::domain::{has_required_values, DomainError, Note, RequestAuth};

/// Per-viewer state of the page: fetched notes, the dialog and its fields.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    notes: Vec<Note>,
    name: String,
    description: String,
    dialog_open: bool,
    error_message: String,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetched note, including incomplete ones
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Fetched notes that have both a title and a comment, in fetch order
    pub fn visible_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|note| has_required_values(note))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn toggle_dialog(&mut self) {
        self.dialog_open = !self.dialog_open;
    }

    /// The dialog's Close button. Typed text is kept for the next opening.
    pub fn close_dialog(&mut self) {
        self.toggle_dialog();
        self.error_message.clear();
    }
}

/// Controller behind the page. Holds the backend handles; the mutable view
/// state lives in a [`BoardState`] owned by each viewer.
pub struct NoteBoard<R: NoteRepository + Clone> {
    lister: NoteLister<R>,
    creator: NoteCreator<R>,
}

impl<R: NoteRepository + Clone> NoteBoard<R> {
    pub fn new(repository: R) -> Self {
        Self {
            lister: NoteLister::new(repository.clone()),
            creator: NoteCreator::new(repository),
        }
    }

    pub fn with_media(mut self, media: Arc<dyn MediaResolver>) -> Self {
        self.lister = self.lister.with_media(media);
        self
    }

    /// Replace the state's list with a fresh fetch. On error the previous list is kept.
    #[instrument(level = "debug", skip_all)]
    pub async fn fetch_notes(
        &self,
        state: &mut BoardState,
        auth: &RequestAuth,
    ) -> Result<(), DomainError> {
        state.notes = self.lister.list_notes(auth).await?;
        Ok(())
    }

    /// Submit the pending fields.
    ///
    /// Invalid fields set the error message and leave the dialog open. A
    /// stored note closes the dialog, clears the error and refetches the list.
    #[instrument(level = "debug", skip_all)]
    pub async fn create_note(
        &self,
        state: &mut BoardState,
        auth: &RequestAuth,
    ) -> Result<Submission, DomainError> {
        let submission = self
            .creator
            .submit(&state.name, &state.description, auth)
            .await?;

        match &submission {
            Submission::Rejected(err) => {
                debug!("Keeping dialog open for incomplete note");
                state.error_message = err.to_string();
            }
            Submission::Created(_) => {
                state.dialog_open = false;
                state.error_message.clear();
                self.fetch_notes(state, auth).await?;
            }
        }
        Ok(submission)
    }
}
