use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use notelog::domain::{Note, NoteId};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Build a stored note; `None` fields model incomplete records
#[allow(dead_code)]
pub fn note(id: &str, name: Option<&str>, description: Option<&str>) -> Note {
    Note {
        id: NoteId(id.to_string()),
        name: name.map(str::to_string),
        description: description.map(str::to_string),
        image: None,
        created_at: None,
        updated_at: None,
    }
}

/// How the fake data API answers
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeMode {
    Ok,
    GraphErrors,
    ServerError,
}

/// A request seen by the fake data API
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub api_key: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct FakeState {
    mode: FakeMode,
    notes: Arc<Mutex<Vec<Value>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Local stand-in for the backend data API, serving `/models/Note`
#[allow(dead_code)]
pub struct FakeDataApi {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    _shutdown: oneshot::Sender<()>,
}

#[allow(dead_code)]
impl FakeDataApi {
    pub async fn start(mode: FakeMode, notes: Vec<Value>) -> Self {
        let requests = Arc::new(Mutex::new(vec![]));
        let state = FakeState {
            mode,
            notes: Arc::new(Mutex::new(notes)),
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/models/Note", get(list_handler).post(create_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake data API");
        let addr = listener.local_addr().expect("Failed to read fake data API address");
        let (tx, rx) = oneshot::channel();
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = rx.await;
        });
        tokio::spawn(async move {
            let _ = server.await;
        });

        Self {
            endpoint: format!("http://{addr}"),
            requests,
            _shutdown: tx,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn record(state: &FakeState, method: &str, headers: &HeaderMap, body: Option<Value>) {
    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        api_key: header(headers, "x-api-key"),
        authorization: header(headers, "authorization"),
        body,
    });
}

fn failure(mode: FakeMode) -> Option<axum::response::Response> {
    match mode {
        FakeMode::Ok => None,
        FakeMode::GraphErrors => Some(
            Json(json!({ "data": null, "errors": [{ "message": "Not Authorized to access listNotes" }] }))
                .into_response(),
        ),
        FakeMode::ServerError => Some(StatusCode::INTERNAL_SERVER_ERROR.into_response()),
    }
}

async fn list_handler(State(state): State<FakeState>, headers: HeaderMap) -> impl IntoResponse {
    record(&state, "GET", &headers, None);
    if let Some(response) = failure(state.mode) {
        return response;
    }
    let notes = state.notes.lock().unwrap().clone();
    Json(json!({ "data": notes })).into_response()
}

async fn create_handler(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record(&state, "POST", &headers, Some(body.clone()));
    if let Some(response) = failure(state.mode) {
        return response;
    }
    let mut notes = state.notes.lock().unwrap();
    let mut created = body;
    created["id"] = json!(format!("srv-{}", notes.len() + 1));
    created["createdAt"] = json!("2024-05-01T10:00:00Z");
    created["updatedAt"] = json!("2024-05-01T10:00:00Z");
    notes.push(created.clone());
    Json(json!({ "data": created })).into_response()
}
