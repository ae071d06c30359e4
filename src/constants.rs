// src/constants.rs
//
// Application-wide constants shared between the controller, the presenter and
// the adapters.

/// Message shown in the dialog when a note is submitted without a title or comment.
///
/// Used in: `domain/error.rs`, `application/board.rs`
pub const REQUIRED_FIELDS_MESSAGE: &str = "Both a Title and Comment are Required.";

/// Message shown on the sign-in page after rejected credentials.
///
/// Used in: `ports/web.rs`
pub const SIGN_IN_FAILED_MESSAGE: &str = "Incorrect username or password.";

/// Cookie carrying the browser session id.
///
/// Used in: `ports/web.rs`
pub const SESSION_COOKIE: &str = "notelog_session";

/// Lifetime of a signed media URL in seconds.
///
/// Used in: `config.rs`
pub const DEFAULT_URL_TTL_SECS: u64 = 900;

/// Model path segment of the data API.
///
/// Used in: `infrastructure/data_api.rs`
pub const NOTE_MODEL_PATH: &str = "models/Note";

/// Upper bound on browser sessions kept in memory.
///
/// Used in: `infrastructure/session.rs`
pub const MAX_SESSIONS: usize = 10_000;

/// Seconds a browser session may sit unused before it is dropped.
///
/// Used in: `infrastructure/session.rs`
pub const SESSION_IDLE_SECS: u64 = 3600;
