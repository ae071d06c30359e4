// src/application/note_creator.rs
use tracing::{debug, info, instrument};

use crate::application::NoteRepository;
use crate::domain::{validate_draft, DomainError, Note, RequestAuth, ValidationError};

/// Outcome of submitting the dialog fields.
#[derive(Debug)]
pub enum Submission {
    Created(Note),
    Rejected(ValidationError),
}

pub struct NoteCreator<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteCreator<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Validate the fields and store the note.
    ///
    /// A rejected draft never reaches the backend.
    #[instrument(level = "debug", skip(self, description, auth))]
    pub async fn submit(
        &self,
        name: &str,
        description: &str,
        auth: &RequestAuth,
    ) -> Result<Submission, DomainError> {
        let draft = match validate_draft(name, description) {
            Ok(draft) => draft,
            Err(err) => {
                debug!("Rejected incomplete note");
                return Ok(Submission::Rejected(err));
            }
        };

        let note = self.repository.create_note(&draft, auth).await?;
        info!(note_id = %note.id, "Created note");
        Ok(Submission::Created(note))
    }
}
