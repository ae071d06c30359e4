// src/application/note_lister.rs
use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, instrument};

use crate::application::{MediaResolver, NoteRepository};
use crate::domain::{media_path, DomainError, Note, RequestAuth};

pub struct NoteLister<R: NoteRepository> {
    repository: R,
    media: Option<Arc<dyn MediaResolver>>,
}

impl<R: NoteRepository> NoteLister<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            media: None,
        }
    }

    /// Resolve attached images through `media` for signed-in requests
    pub fn with_media(mut self, media: Arc<dyn MediaResolver>) -> Self {
        self.media = Some(media);
        self
    }

    /// Fetch every stored note.
    ///
    /// When the request carries an identity and a resolver is configured, each
    /// non-empty `image` is replaced by its resolved URL. Resolutions run
    /// concurrently and the first failure aborts the whole fetch.
    #[instrument(level = "debug", skip_all)]
    pub async fn list_notes(&self, auth: &RequestAuth) -> Result<Vec<Note>, DomainError> {
        let mut notes = self.repository.list_notes(auth).await?;
        debug!(count = notes.len(), "Fetched notes");

        let (Some(media), Some(identity)) = (self.media.as_ref(), auth.identity()) else {
            return Ok(notes);
        };

        let resolutions = notes.iter_mut().filter_map(|note| {
            let image = note.image.clone().filter(|image| !image.is_empty())?;
            Some(async move {
                let url = media
                    .resolve(&media_path(&identity.id, &image), identity)
                    .await?;
                note.image = Some(url);
                Ok::<_, DomainError>(())
            })
        });
        let resolved = try_join_all(resolutions).await?;
        debug!(resolved = resolved.len(), "Resolved note images");

        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, NoteId};
    use crate::util::testing::{MockMediaResolver, MockNoteRepository};

    fn note(id: &str, image: Option<&str>) -> Note {
        Note {
            id: NoteId(id.to_string()),
            name: Some(format!("Title {id}")),
            description: Some("Comment".to_string()),
            image: image.map(str::to_string),
            created_at: None,
            updated_at: None,
        }
    }

    fn signed_in() -> RequestAuth {
        RequestAuth::UserPool(Identity {
            id: "id-42".to_string(),
            username: "ada".to_string(),
            access_token: "token".to_string(),
        })
    }

    #[tokio::test]
    async fn given_signed_in_request_when_listing_then_replaces_images_with_urls() {
        // Arrange
        let repo = MockNoteRepository::builder()
            .with_note(note("1", Some("shot.png")))
            .with_note(note("2", None))
            .build();
        let lister = NoteLister::new(repo).with_media(Arc::new(MockMediaResolver::new()));

        // Act
        let notes = lister.list_notes(&signed_in()).await.unwrap();

        // Assert
        assert_eq!(
            notes[0].image.as_deref(),
            Some("https://media.test/media/id-42/shot.png")
        );
        assert_eq!(notes[1].image, None);
    }

    #[tokio::test]
    async fn given_empty_image_when_listing_then_leaves_it_unresolved() {
        let repo = MockNoteRepository::builder()
            .with_note(note("1", Some("")))
            .build();
        let lister = NoteLister::new(repo).with_media(Arc::new(MockMediaResolver::new()));

        let notes = lister.list_notes(&signed_in()).await.unwrap();

        assert_eq!(notes[0].image.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn given_api_key_request_when_listing_then_does_not_resolve_images() {
        let repo = MockNoteRepository::builder()
            .with_note(note("1", Some("shot.png")))
            .build();
        let lister = NoteLister::new(repo).with_media(Arc::new(MockMediaResolver::new()));

        let notes = lister.list_notes(&RequestAuth::ApiKey).await.unwrap();

        assert_eq!(notes[0].image.as_deref(), Some("shot.png"));
    }

    #[tokio::test]
    async fn given_failing_resolver_when_listing_then_propagates_error() {
        let repo = MockNoteRepository::builder()
            .with_note(note("1", Some("ok.png")))
            .with_note(note("2", Some("broken.png")))
            .build();
        let media = MockMediaResolver::new().failing_on("broken.png");
        let lister = NoteLister::new(repo).with_media(Arc::new(media));

        let result = lister.list_notes(&signed_in()).await;

        assert!(matches!(result, Err(DomainError::Media(_))));
    }
}
