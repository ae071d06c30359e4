// src/infrastructure/memory.rs
use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::NoteRepository;
use crate::domain::{DomainError, Note, NoteDraft, NoteId, RequestAuth};

/// Process-local note store. Accepts any request auth.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing notes, which may be incomplete
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: RwLock::new(notes),
        }
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteStore {
    #[instrument(level = "debug", skip_all)]
    async fn list_notes(&self, _auth: &RequestAuth) -> Result<Vec<Note>, DomainError> {
        let notes = self
            .notes
            .read()
            .map_err(|e| DomainError::Backend(format!("Note store poisoned: {e}")))?;
        Ok(notes.clone())
    }

    #[instrument(level = "debug", skip_all)]
    async fn create_note(
        &self,
        draft: &NoteDraft,
        _auth: &RequestAuth,
    ) -> Result<Note, DomainError> {
        let now = OffsetDateTime::now_utc();
        let note = Note {
            id: NoteId(Uuid::new_v4().to_string()),
            name: Some(draft.name().to_string()),
            description: Some(draft.description().to_string()),
            image: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.notes
            .write()
            .map_err(|e| DomainError::Backend(format!("Note store poisoned: {e}")))?
            .push(note.clone());
        debug!(note_id = %note.id, "Stored note in memory");
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate_draft;

    #[tokio::test]
    async fn given_empty_store_when_creating_then_assigns_id_and_timestamps() {
        // Arrange
        let store = MemoryNoteStore::new();
        let draft = validate_draft("Crash on save", "Steps: ...").unwrap();

        // Act
        let note = store.create_note(&draft, &RequestAuth::ApiKey).await.unwrap();

        // Assert
        assert!(Uuid::parse_str(&note.id.0).is_ok());
        assert_eq!(note.name.as_deref(), Some("Crash on save"));
        assert!(note.created_at.is_some());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[tokio::test]
    async fn given_seeded_notes_when_creating_then_lists_in_insertion_order() {
        let seeded = Note {
            id: NoteId("seed".to_string()),
            name: Some("Incomplete".to_string()),
            description: None,
            image: None,
            created_at: None,
            updated_at: None,
        };
        let store = MemoryNoteStore::with_notes(vec![seeded]);
        let draft = validate_draft("Second", "Comment").unwrap();

        let created = store.create_note(&draft, &RequestAuth::ApiKey).await.unwrap();
        let notes = store.list_notes(&RequestAuth::ApiKey).await.unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, NoteId("seed".to_string()));
        assert_eq!(notes[1].id, created.id);
    }

    #[tokio::test]
    async fn given_two_creates_when_listing_then_ids_are_distinct() {
        let store = MemoryNoteStore::new();
        let draft = validate_draft("Same", "Same").unwrap();

        let first = store.create_note(&draft, &RequestAuth::ApiKey).await.unwrap();
        let second = store.create_note(&draft, &RequestAuth::ApiKey).await.unwrap();

        assert_ne!(first.id, second.id);
    }
}
