// src/infrastructure/media.rs
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::Sha256;
use time::OffsetDateTime;
use tracing::instrument;

use crate::application::MediaResolver;
use crate::domain::{DomainError, Identity};

type HmacSha256 = Hmac<Sha256>;

/// Issues time-limited media links signed with a shared HMAC key.
///
/// A link is `{base_url}/{path}?identity=..&expires=..&signature=..`; the
/// media host recomputes the signature over path, identity and expiry.
#[derive(Debug, Clone)]
pub struct SignedUrlResolver {
    base_url: String,
    key: Vec<u8>,
    ttl_secs: i64,
}

impl SignedUrlResolver {
    pub fn new(base_url: &str, key: &str, ttl: Duration) -> Result<Self, DomainError> {
        if key.is_empty() {
            return Err(DomainError::Configuration(
                "storage.signing_key is required to sign media links".to_string(),
            ));
        }
        Url::parse(base_url)
            .map_err(|e| DomainError::Configuration(format!("Invalid storage.base_url: {e}")))?;
        let ttl_secs = i64::try_from(ttl.as_secs()).map_err(|_| {
            DomainError::Configuration(format!(
                "storage.url_ttl_secs is too large: {}",
                ttl.as_secs()
            ))
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.as_bytes().to_vec(),
            ttl_secs,
        })
    }

    /// Signature over `"{path}\n{identity_id}\n{expires}"`
    pub fn signature(
        &self,
        path: &str,
        identity_id: &str,
        expires: i64,
    ) -> Result<String, DomainError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| DomainError::Media(e.to_string()))?;
        mac.update(format!("{path}\n{identity_id}\n{expires}").as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    pub fn signed_url(
        &self,
        path: &str,
        identity_id: &str,
        expires: i64,
    ) -> Result<String, DomainError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| DomainError::Media(format!("Cannot build URL for {path}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("identity", identity_id)
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &self.signature(path, identity_id, expires)?);
        Ok(url.into())
    }
}

#[async_trait]
impl MediaResolver for SignedUrlResolver {
    #[instrument(level = "trace", skip(self, identity))]
    async fn resolve(&self, path: &str, identity: &Identity) -> Result<String, DomainError> {
        let expires = OffsetDateTime::now_utc()
            .unix_timestamp()
            .checked_add(self.ttl_secs)
            .ok_or_else(|| DomainError::Media(format!("Expiry overflows for {path}")))?;
        self.signed_url(path, &identity.id, expires)
    }
}
