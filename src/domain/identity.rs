// src/domain/identity.rs

use std::fmt;

/// Signed-in user. `id` namespaces the user's stored media.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub access_token: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// How a data call authenticates against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAuth {
    /// Shared API key, used when sign-in is disabled.
    ApiKey,
    /// Calls made on behalf of a signed-in user.
    UserPool(Identity),
}

impl RequestAuth {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            RequestAuth::ApiKey => None,
            RequestAuth::UserPool(identity) => Some(identity),
        }
    }
}
