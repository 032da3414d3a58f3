//! Fake full-text engine API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1, serving the document/search wire contract the HTTP backend
//! speaks:
//! - `PUT /{index}/_doc/{id}` — store the document body
//! - `HEAD|GET /{index}/_doc/{id}` — existence probe
//! - `DELETE /{index}/_doc/{id}` — delete, 404 when absent
//! - `POST /{index}/_search` — records the request body and returns the
//!   canned hit list configured via [`FakeEngineApi::set_hits`]
//!
//! Point the client under test at [`FakeEngineApi::base_url`], then assert
//! on what the server recorded.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    documents: HashMap<i64, serde_json::Value>,
    /// Hits returned by `_search`, already in wire form.
    hits: Vec<serde_json::Value>,
    /// Request bodies received on `_search`.
    searches: Vec<serde_json::Value>,
    fail_searches: bool,
    fail_deletes: bool,
}

/// Handle to the running fake engine API server.
pub struct FakeEngineApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeEngineApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route(
                "/{index}/_doc/{id}",
                get(get_document).put(put_document).delete(delete_document),
            )
            .route("/{index}/_search", post(search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Configure the hit list `_search` returns, in rank order.
    pub async fn set_hits(&self, hits: &[(i64, f32)]) {
        let wire: Vec<serde_json::Value> = hits
            .iter()
            .map(|(id, score)| serde_json::json!({ "_id": id.to_string(), "_score": score }))
            .collect();
        self.state.lock().await.hits = wire;
    }

    /// Make `_search` answer 500 for the rest of the test.
    pub async fn fail_searches(&self) {
        self.state.lock().await.fail_searches = true;
    }

    /// Make deletes answer 500 for the rest of the test.
    pub async fn fail_deletes(&self) {
        self.state.lock().await.fail_deletes = true;
    }

    /// Seed a document directly, bypassing the wire.
    pub async fn seed_document(&self, id: i64, body: serde_json::Value) {
        self.state.lock().await.documents.insert(id, body);
    }

    pub async fn document(&self, id: i64) -> Option<serde_json::Value> {
        self.state.lock().await.documents.get(&id).cloned()
    }

    pub async fn document_count(&self) -> usize {
        self.state.lock().await.documents.len()
    }

    /// Request bodies received on `_search`, oldest first.
    pub async fn recorded_searches(&self) -> Vec<serde_json::Value> {
        self.state.lock().await.searches.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn put_document(
    Path((_index, id)): Path<(String, i64)>,
    State(state): State<Arc<Mutex<ApiState>>>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    state.lock().await.documents.insert(id, body);
    StatusCode::CREATED
}

async fn get_document(
    Path((_index, id)): Path<(String, i64)>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> Response {
    let state = state.lock().await;
    match state.documents.get(&id) {
        Some(body) => (StatusCode::OK, Json(body.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_document(
    Path((_index, id)): Path<(String, i64)>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> StatusCode {
    let mut state = state.lock().await;
    if state.fail_deletes {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    match state.documents.remove(&id) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}

async fn search(
    Path(_index): Path<String>,
    State(state): State<Arc<Mutex<ApiState>>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut state = state.lock().await;
    if state.fail_searches {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    state.searches.push(body);
    let response = serde_json::json!({ "hits": { "hits": state.hits.clone() } });
    (StatusCode::OK, Json(response)).into_response()
}
