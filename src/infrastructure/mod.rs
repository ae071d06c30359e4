// src/infrastructure/mod.rs
pub mod auth;
pub mod data_api;
pub mod media;
pub mod memory;
pub mod session;

pub use auth::LocalAuthenticator;
pub use data_api::DataApiClient;
pub use media::SignedUrlResolver;
pub use memory::MemoryNoteStore;
pub use session::{Session, SessionStore};
