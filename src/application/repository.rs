// src/application/repository.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DomainError, Identity, Note, NoteDraft, RequestAuth};

/// Backend that owns the stored notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Every stored note, complete or not, in backend order
    async fn list_notes(&self, auth: &RequestAuth) -> Result<Vec<Note>, DomainError>;

    /// Store a new note; the backend assigns its id
    async fn create_note(&self, draft: &NoteDraft, auth: &RequestAuth)
        -> Result<Note, DomainError>;
}

/// Turns a stored media path into a URL the browser can fetch.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    async fn resolve(&self, path: &str, identity: &Identity) -> Result<String, DomainError>;
}

#[async_trait]
impl<T: NoteRepository + ?Sized> NoteRepository for Arc<T> {
    async fn list_notes(&self, auth: &RequestAuth) -> Result<Vec<Note>, DomainError> {
        (**self).list_notes(auth).await
    }

    async fn create_note(
        &self,
        draft: &NoteDraft,
        auth: &RequestAuth,
    ) -> Result<Note, DomainError> {
        (**self).create_note(draft, auth).await
    }
}
