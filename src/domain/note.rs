// src/domain/note.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::ValidationError;

/// Identifier assigned by the backend when a note is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub String);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// The fields sent to the backend on create: a title and a comment.
///
/// Only [`validate_draft`] hands these out, so a draft is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    name: String,
    description: String,
}

impl NoteDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn is_filled(field: Option<&str>) -> bool {
    field.is_some_and(|value| !value.is_empty())
}

/// True when both the title and the comment are present and non-empty.
///
/// Notes failing this check stay in storage but are never rendered.
pub fn has_required_values(note: &Note) -> bool {
    is_filled(note.name.as_deref()) && is_filled(note.description.as_deref())
}

pub fn validate_draft(name: &str, description: &str) -> Result<NoteDraft, ValidationError> {
    if is_filled(Some(name)) && is_filled(Some(description)) {
        Ok(NoteDraft {
            name: name.to_string(),
            description: description.to_string(),
        })
    } else {
        Err(ValidationError)
    }
}

/// Storage key of an attached image, scoped to the owning identity.
pub fn media_path(identity_id: &str, image: &str) -> String {
    format!("media/{identity_id}/{image}")
}
