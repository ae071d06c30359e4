// src/domain/mod.rs
pub mod error;
pub mod identity;
pub mod note;

pub use error::{DomainError, ValidationError};
pub use identity::{Identity, RequestAuth};
pub use note::{has_required_values, media_path, validate_draft, Note, NoteDraft, NoteId};
