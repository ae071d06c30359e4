// src/ports/web.rs
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::application::{NoteBoard, NoteRepository};
use crate::constants::{SESSION_COOKIE, SIGN_IN_FAILED_MESSAGE};
use crate::domain::{DomainError, RequestAuth};
use crate::infrastructure::{LocalAuthenticator, Session, SessionStore};
use crate::ports::HtmlPresenter;

pub type Board = NoteBoard<Arc<dyn NoteRepository>>;

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    board: Arc<Board>,
    sessions: SessionStore,
    auth: Option<Arc<LocalAuthenticator>>,
    presenter: Arc<HtmlPresenter>,
}

impl AppState {
    /// `auth` gates the board behind sign-in when set
    pub fn new(board: Board, auth: Option<LocalAuthenticator>) -> Self {
        Self {
            board: Arc::new(board),
            sessions: SessionStore::new(),
            auth: auth.map(Arc::new),
            presenter: Arc::new(HtmlPresenter::new()),
        }
    }

    /// Auth mode for data calls, or `None` while the browser must sign in
    fn request_auth(&self, session: &Session) -> Option<RequestAuth> {
        match self.auth {
            None => Some(RequestAuth::ApiKey),
            Some(_) => session.identity.clone().map(RequestAuth::UserPool),
        }
    }

    fn board_page(&self, session: &Session) -> String {
        self.presenter.render(&session.board, session.identity.as_ref())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/notes", post(create_note))
        .route("/dialog/toggle", post(toggle_dialog))
        .route("/dialog/close", post(close_dialog))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct NoteForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct SignInForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

fn page(id: &str, status: StatusCode, html: String) -> Response {
    let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
    (status, [(SET_COOKIE, cookie)], Html(html)).into_response()
}

/// Page load: fetch the notes and render the board
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let (id, session) = state.sessions.get_or_create(session_id(&headers));
    let mut session = session.lock().await;
    let Some(auth) = state.request_auth(&session) else {
        return Ok(page(&id, StatusCode::OK, state.presenter.render_sign_in("")));
    };

    state.board.fetch_notes(&mut session.board, &auth).await?;
    Ok(page(&id, StatusCode::OK, state.board_page(&session)))
}

async fn create_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<NoteForm>,
) -> Result<Response, AppError> {
    let (id, session) = state.sessions.get_or_create(session_id(&headers));
    let mut session = session.lock().await;
    let Some(auth) = state.request_auth(&session) else {
        return Err(DomainError::Unauthorized.into());
    };

    session.board.set_name(form.name);
    session.board.set_description(form.description);
    state.board.create_note(&mut session.board, &auth).await?;
    Ok(page(&id, StatusCode::OK, state.board_page(&session)))
}

async fn toggle_dialog(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (id, session) = state.sessions.get_or_create(session_id(&headers));
    let mut session = session.lock().await;
    if state.request_auth(&session).is_none() {
        return Err(DomainError::Unauthorized.into());
    }

    session.board.toggle_dialog();
    Ok(page(&id, StatusCode::OK, state.board_page(&session)))
}

/// The dialog's Close button; the form carries whatever was typed so far
async fn close_dialog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<NoteForm>,
) -> Result<Response, AppError> {
    let (id, session) = state.sessions.get_or_create(session_id(&headers));
    let mut session = session.lock().await;
    if state.request_auth(&session).is_none() {
        return Err(DomainError::Unauthorized.into());
    }

    session.board.set_name(form.name);
    session.board.set_description(form.description);
    session.board.close_dialog();
    Ok(page(&id, StatusCode::OK, state.board_page(&session)))
}

async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SignInForm>,
) -> Result<Response, AppError> {
    let (mut id, handle) = state.sessions.get_or_create(session_id(&headers));
    let mut session = handle.lock().await;

    if let Some(authenticator) = &state.auth {
        match authenticator.sign_in(&form.username, &form.password) {
            Some(identity) => {
                session.identity = Some(identity);
                id = state.sessions.rotate(&id, &handle);
            }
            None => {
                let html = state.presenter.render_sign_in(SIGN_IN_FAILED_MESSAGE);
                return Ok(page(&id, StatusCode::UNAUTHORIZED, html));
            }
        }
    }

    let auth = state
        .request_auth(&session)
        .ok_or(DomainError::Unauthorized)?;
    state.board.fetch_notes(&mut session.board, &auth).await?;
    Ok(page(&id, StatusCode::OK, state.board_page(&session)))
}

/// Drops the identity together with the board state of this browser
async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id(&headers) {
        state.sessions.remove(id);
    }
    let (id, session) = state.sessions.get_or_create(None);
    let session = session.lock().await;
    debug!("Signed out");

    match state.auth {
        Some(_) => page(&id, StatusCode::OK, state.presenter.render_sign_in("")),
        None => page(&id, StatusCode::OK, state.board_page(&session)),
    }
}

async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Domain(DomainError::Unauthorized) => StatusCode::UNAUTHORIZED,
            AppError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, self.to_string()).into_response()
    }
}
