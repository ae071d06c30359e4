// src/infrastructure/data_api.rs
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::NoteRepository;
use crate::constants::NOTE_MODEL_PATH;
use crate::domain::{DomainError, Note, NoteDraft, RequestAuth};

/// Client for the backend data API's `Note` model.
///
/// Replies come wrapped as `{"data": ..., "errors": [{"message": ...}]}`.
#[derive(Debug, Clone)]
pub struct DataApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

impl DataApiClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, DomainError> {
        if endpoint.is_empty() {
            return Err(DomainError::Configuration(
                "backend.endpoint is required for the http backend".to_string(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn model_url(&self) -> String {
        format!("{}/{}", self.endpoint, NOTE_MODEL_PATH)
    }

    fn authorize(&self, request: RequestBuilder, auth: &RequestAuth) -> RequestBuilder {
        match auth {
            RequestAuth::ApiKey => request.header("x-api-key", &self.api_key),
            RequestAuth::UserPool(identity) => request.bearer_auth(&identity.access_token),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Backend(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Backend(format!(
                "Data API returned {status}: {body}"
            )));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| DomainError::Backend(format!("Malformed data API reply: {e}")))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(DomainError::Backend(messages.join("; ")));
        }
        envelope
            .data
            .ok_or_else(|| DomainError::Backend("Data API reply has no data".to_string()))
    }
}

#[async_trait]
impl NoteRepository for DataApiClient {
    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint))]
    async fn list_notes(&self, auth: &RequestAuth) -> Result<Vec<Note>, DomainError> {
        let request = self.authorize(self.client.get(self.model_url()), auth);
        let notes: Vec<Note> = self.send(request).await?;
        debug!(count = notes.len(), "Listed notes from data API");
        Ok(notes)
    }

    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint))]
    async fn create_note(
        &self,
        draft: &NoteDraft,
        auth: &RequestAuth,
    ) -> Result<Note, DomainError> {
        let request = self.authorize(self.client.post(self.model_url()).json(draft), auth);
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_trailing_slash_when_building_model_url_then_joins_cleanly() {
        let client = DataApiClient::new("https://api.example.com/", "key").unwrap();

        assert_eq!(client.model_url(), "https://api.example.com/models/Note");
    }

    #[test]
    fn given_empty_endpoint_when_creating_client_then_returns_configuration_error() {
        let result = DataApiClient::new("", "key");

        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }
}
