// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{MediaResolver, NoteRepository};
use crate::domain::{DomainError, Identity, Note, NoteDraft, NoteId, RequestAuth};

/// Shared mock repository for testing use cases that depend on NoteRepository
///
/// Created notes are appended to the listed notes, so a refetch after a
/// create sees the new note. Every create and every list call is recorded.
///
/// # Examples
///
/// ```
/// use notelog::util::testing::MockNoteRepository;
/// use notelog::domain::{Note, NoteId};
///
/// let mock = MockNoteRepository::builder()
///     .with_note(Note {
///         id: NoteId("1".to_string()),
///         name: Some("Crash on save".to_string()),
///         description: Some("Steps: ...".to_string()),
///         image: None,
///         created_at: None,
///         updated_at: None,
///     })
///     .build();
/// assert!(mock.created().is_empty());
/// ```
pub struct MockNoteRepository {
    notes: Mutex<Vec<Note>>,
    created: Mutex<Vec<NoteDraft>>,
    auths: Mutex<Vec<RequestAuth>>,
    list_calls: AtomicUsize,
    list_failure: Option<String>,
    create_failure: Option<String>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    /// Drafts passed to create_note, in call order
    pub fn created(&self) -> Vec<NoteDraft> {
        self.created.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Request auth of every call, in call order
    pub fn auths(&self) -> Vec<RequestAuth> {
        self.auths.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn list_notes(&self, auth: &RequestAuth) -> Result<Vec<Note>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.auths.lock().unwrap().push(auth.clone());

        match &self.list_failure {
            Some(message) => Err(DomainError::Backend(message.clone())),
            None => Ok(self.notes.lock().unwrap().clone()),
        }
    }

    async fn create_note(
        &self,
        draft: &NoteDraft,
        auth: &RequestAuth,
    ) -> Result<Note, DomainError> {
        self.auths.lock().unwrap().push(auth.clone());
        if let Some(message) = &self.create_failure {
            return Err(DomainError::Backend(message.clone()));
        }

        let mut created = self.created.lock().unwrap();
        created.push(draft.clone());
        let note = Note {
            id: NoteId(format!("mock-{}", created.len())),
            name: Some(draft.name().to_string()),
            description: Some(draft.description().to_string()),
            image: None,
            created_at: None,
            updated_at: None,
        };
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: Vec<Note>,
    list_failure: Option<String>,
    create_failure: Option<String>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            list_failure: None,
            create_failure: None,
        }
    }

    /// Add a stored note, returned by list_notes in insertion order
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Make list_notes fail with a backend error
    pub fn with_list_failure(mut self, message: &str) -> Self {
        self.list_failure = Some(message.to_string());
        self
    }

    /// Make create_note fail with a backend error
    pub fn with_create_failure(mut self, message: &str) -> Self {
        self.create_failure = Some(message.to_string());
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            notes: Mutex::new(self.notes),
            created: Mutex::new(vec![]),
            auths: Mutex::new(vec![]),
            list_calls: AtomicUsize::new(0),
            list_failure: self.list_failure,
            create_failure: self.create_failure,
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolver returning `https://media.test/{path}`, failing for chosen images
#[derive(Default)]
pub struct MockMediaResolver {
    failing: HashSet<String>,
}

impl MockMediaResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail resolution for any path ending in `image`
    pub fn failing_on(mut self, image: &str) -> Self {
        self.failing.insert(image.to_string());
        self
    }
}

#[async_trait]
impl MediaResolver for MockMediaResolver {
    async fn resolve(&self, path: &str, _identity: &Identity) -> Result<String, DomainError> {
        if self.failing.iter().any(|image| path.ends_with(image.as_str())) {
            return Err(DomainError::Media(format!("Cannot resolve {path}")));
        }
        Ok(format!("https://media.test/{path}"))
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "h2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str) -> Note {
        Note {
            id: NoteId(id.to_string()),
            name: Some("Question".to_string()),
            description: Some("Answer".to_string()),
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn given_notes_added_when_listing_then_returns_them_in_order() {
        let mock = MockNoteRepository::builder()
            .with_note(note("b"))
            .with_note(note("a"))
            .build();

        let result = mock.list_notes(&RequestAuth::ApiKey).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, NoteId("b".to_string()));
        assert_eq!(mock.list_calls(), 1);
    }

    #[tokio::test]
    async fn given_list_failure_configured_when_listing_then_returns_error() {
        let mock = MockNoteRepository::builder()
            .with_list_failure("down")
            .build();

        let result = mock.list_notes(&RequestAuth::ApiKey).await;

        assert!(matches!(result, Err(DomainError::Backend(_))));
    }

    #[tokio::test]
    async fn given_created_note_when_listing_then_includes_it() {
        let mock = MockNoteRepository::builder().build();
        let draft = crate::domain::validate_draft("Title", "Comment").unwrap();

        let created = mock.create_note(&draft, &RequestAuth::ApiKey).await.unwrap();
        let listed = mock.list_notes(&RequestAuth::ApiKey).await.unwrap();

        assert_eq!(created.id, NoteId("mock-1".to_string()));
        assert_eq!(listed, vec![created]);
        assert_eq!(mock.auths().len(), 2);
    }

    #[tokio::test]
    async fn given_failing_image_when_resolving_then_returns_media_error() {
        let resolver = MockMediaResolver::new().failing_on("bad.png");
        let identity = Identity {
            id: "id-1".to_string(),
            username: "ada".to_string(),
            access_token: "t".to_string(),
        };

        let ok = resolver.resolve("media/id-1/good.png", &identity).await;
        let bad = resolver.resolve("media/id-1/bad.png", &identity).await;

        assert_eq!(ok.unwrap(), "https://media.test/media/id-1/good.png");
        assert!(matches!(bad, Err(DomainError::Media(_))));
    }
}
