// src/domain/error.rs
use thiserror::Error;

use crate::constants::REQUIRED_FIELDS_MESSAGE;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Media error: {0}")]
    Media(String),
    #[error("Not signed in")]
    Unauthorized,
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Rejection of a draft whose title or comment is missing.
///
/// The display text is the message shown to the user in the dialog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", REQUIRED_FIELDS_MESSAGE)]
pub struct ValidationError;
