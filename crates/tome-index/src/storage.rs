//! Byte-storage collaborator.
//!
//! The catalog stores a (possibly percent-encoded) reference to each
//! uploaded PDF; this module fetches the bytes behind such a reference.
//! [`ByteStore`] is the seam: [`HttpStore`] talks to the real object store
//! over HTTP, [`MemoryStore`] backs tests and local development.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use tome_core::config::StorageConfig;

/// Failure fetching source bytes. Propagates into an extraction input
/// error at the job level.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage request failed: {0}")]
    Transport(String),

    #[error("storage returned status {0} for {1}")]
    Status(u16, String),
}

/// Provider of raw object bytes by reference.
#[async_trait]
pub trait ByteStore: Send + Sync {
    async fn download_bytes(&self, reference: &str) -> Result<Vec<u8>, StoreError>;
}

// ---------------------------------------------------------------------------
// HTTP store
// ---------------------------------------------------------------------------

/// Fetches objects from an HTTP object store at `{base_url}/{reference}`.
pub struct HttpStore {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
}

impl HttpStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ByteStore for HttpStore {
    async fn download_bytes(&self, reference: &str) -> Result<Vec<u8>, StoreError> {
        let url = format!("{}/{}", self.base_url, encode_path(reference));
        let request = Request::builder()
            .method(Method::GET)
            .uri(&url)
            .body(Full::new(Bytes::new()))
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(StoreError::Status(status.as_u16(), reference.to_string()));
        }
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?
            .to_bytes();
        Ok(body.to_vec())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Object store held in a `HashMap`, for tests and local development.
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, reference: impl Into<String>, bytes: Vec<u8>) {
        self.objects
            .write()
            .expect("store lock poisoned")
            .insert(reference.into(), bytes);
    }
}

#[async_trait]
impl ByteStore for MemoryStore {
    async fn download_bytes(&self, reference: &str) -> Result<Vec<u8>, StoreError> {
        self.objects
            .read()
            .expect("store lock poisoned")
            .get(reference)
            .cloned()
            .ok_or_else(|| StoreError::Status(404, reference.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Reference encoding
// ---------------------------------------------------------------------------

/// Decode `%XX` escapes in a stored reference. Invalid escapes pass through
/// untouched.
pub fn percent_decode(reference: &str) -> String {
    let bytes = reference.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).copied().and_then(hex_value),
                bytes.get(i + 2).copied().and_then(hex_value),
            ) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode a canonical object name for use as a URL path. Keeps
/// unreserved characters and path separators.
fn encode_path(reference: &str) -> String {
    let mut out = String::with_capacity(reference.len());
    for byte in reference.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
