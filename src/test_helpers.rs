//! Stub auth backend and fixtures shared by unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use crate::config::SessionConfig;
use crate::context::SessionContext;
use crate::storage::{MemoryStorage, Storage, StorageError};

pub const STUB_PASSWORD: &str = "pw";
pub const ADMIN_EMAIL: &str = "admin@b.com";
pub const SLOW_EMAIL: &str = "slow@b.com";
pub const GARBAGE_EMAIL: &str = "garbage@b.com";
pub const EMPTY_TOKEN_EMAIL: &str = "empty@b.com";
pub const TAKEN_EMAIL: &str = "taken@b.com";

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"].as_str() != Some(STUB_PASSWORD) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "invalid credentials" }))).into_response();
    }
    match email {
        GARBAGE_EMAIL => (StatusCode::OK, "not json").into_response(),
        EMPTY_TOKEN_EMAIL => Json(json!({ "token": "", "user": { "id": 3 } })).into_response(),
        ADMIN_EMAIL => Json(json!({
            "token": "T-ADMIN",
            "user": { "id": 9, "name": "Root", "email": ADMIN_EMAIL, "role": "admin" }
        }))
        .into_response(),
        SLOW_EMAIL => {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Json(json!({ "token": "T-SLOW", "user": { "id": 5, "role": "user" } })).into_response()
        }
        _ => Json(json!({ "token": "T1", "user": { "id": 1, "role": "user" } })).into_response(),
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    let name = body["name"].as_str().unwrap_or_default();
    let email = body["email"].as_str().unwrap_or_default();
    if email == TAKEN_EMAIL {
        return (StatusCode::CONFLICT, Json(json!({ "error": "email taken" }))).into_response();
    }
    Json(json!({
        "token": "T-SIGNUP",
        "user": { "id": 2, "name": name, "email": email, "role": "user" }
    }))
    .into_response()
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    Json(json!({ "authorization": authorization }))
}

async fn forbidden() -> StatusCode {
    StatusCode::FORBIDDEN
}

/// Serve the stub on an ephemeral port and return its base URL.
pub async fn spawn_stub_backend() -> String {
    let app = axum::Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/echo-auth", get(echo_auth))
        .route("/api/forbidden", get(forbidden));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Context over a fresh in-memory store. The storage handle is returned so
/// tests can inspect what was persisted.
pub fn memory_context(base_url: &str) -> (SessionContext, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let ctx = context_over(base_url, storage.clone());
    (ctx, storage)
}

pub fn context_over(base_url: &str, storage: Arc<MemoryStorage>) -> SessionContext {
    let config = SessionConfig::new(base_url).unwrap();
    SessionContext::bootstrap(&config, storage).unwrap()
}

/// Memory storage whose writes to chosen keys can be made to fail.
#[derive(Debug, Default)]
pub struct FailingStorage {
    pub inner: MemoryStorage,
    failing_saves: Mutex<HashSet<String>>,
}

impl FailingStorage {
    pub fn fail_saves_of(&self, key: &str) {
        self.failing_saves.lock().unwrap().insert(key.to_owned());
    }
}

impl Storage for FailingStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing_saves.lock().unwrap().contains(key) {
            return Err(StorageError::Io(std::io::Error::other(format!("write to {key} refused"))));
        }
        self.inner.save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

pub fn context_over_storage(base_url: &str, storage: Arc<dyn Storage>) -> SessionContext {
    let config = SessionConfig::new(base_url).unwrap();
    SessionContext::bootstrap(&config, storage).unwrap()
}
