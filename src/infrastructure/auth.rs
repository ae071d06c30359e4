// src/infrastructure/auth.rs
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::UserConfig;
use crate::domain::Identity;

/// Checks credentials against the users listed in the configuration.
#[derive(Debug, Clone)]
pub struct LocalAuthenticator {
    users: Vec<UserConfig>,
}

impl LocalAuthenticator {
    pub fn new(users: Vec<UserConfig>) -> Self {
        if users.is_empty() {
            warn!("Sign-in is enabled but no users are configured");
        }
        Self { users }
    }

    /// Identity with a fresh access token, or `None` for unknown credentials
    pub fn sign_in(&self, username: &str, password: &str) -> Option<Identity> {
        let user = self
            .users
            .iter()
            .find(|user| user.username == username && user.password == password);

        match user {
            Some(user) => {
                info!(username, "Signed in");
                Some(Identity {
                    id: user.identity_id.clone(),
                    username: user.username.clone(),
                    access_token: Uuid::new_v4().simple().to_string(),
                })
            }
            None => {
                warn!(username, "Rejected sign-in");
                None
            }
        }
    }
}
