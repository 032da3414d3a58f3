//! HTTP search engine backend.
//!
//! Speaks the engine's document/match-query wire API over a hand-rolled
//! `hyper` client: `PUT|HEAD|DELETE /{index}/_doc/{id}` for the document
//! lifecycle and `POST /{index}/_search` with a `multi_match` body for
//! queries. Every call runs under the configured timeout; expiry surfaces
//! as [`EngineError::Timeout`].

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::Deserialize;
use std::time::Duration;
use tome_core::config::EngineConfig;
use tome_core::error::EngineError;
use tome_core::search::{FieldBoost, Fuzziness, MatchQuery, SearchEngine};
use tome_core::types::{BookId, SearchDocument, SearchHit};

/// Client for a remote full-text engine.
pub struct HttpEngine {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
    index: String,
    timeout: Duration,
}

/// Transport-level failure, classified into [`EngineError`] per operation
/// by the caller.
enum CallFailure {
    Timeout(Duration),
    Transport(String),
}

impl HttpEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            index: config.index.clone(),
            timeout: config.timeout(),
        }
    }

    fn document_url(&self, book_id: BookId) -> String {
        format!("{}/{}/_doc/{}", self.base_url, self.index, book_id)
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, self.index)
    }

    /// Issue one request under the call timeout, collecting the body.
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Bytes), CallFailure> {
        let mut builder = Request::builder().method(method).uri(url);
        if body.is_some() {
            builder = builder.header(http::header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(Full::new(Bytes::from(body.unwrap_or_default())))
            .map_err(|e| CallFailure::Transport(e.to_string()))?;

        let exchange = async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| CallFailure::Transport(e.to_string()))?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| CallFailure::Transport(e.to_string()))?
                .to_bytes();
            Ok((status, body))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(CallFailure::Timeout(self.timeout)),
        }
    }
}

fn field_spec(fb: &FieldBoost) -> String {
    if fb.boost == 1.0 {
        fb.field.to_string()
    } else {
        format!("{}^{}", fb.field, fb.boost)
    }
}

/// Serialize a [`MatchQuery`] into the engine's `multi_match` body.
fn search_body(query: &MatchQuery) -> serde_json::Value {
    let mut multi_match = serde_json::json!({
        "query": query.query,
        "fields": query.fields.iter().map(field_spec).collect::<Vec<_>>(),
        "type": "most_fields",
        "operator": query.operator.to_string(),
    });
    if query.fuzziness == Fuzziness::Auto {
        multi_match["fuzziness"] = serde_json::Value::String("AUTO".to_string());
    }
    serde_json::json!({ "query": { "multi_match": multi_match } })
}

#[derive(Deserialize)]
struct WireResponse {
    hits: WireHits,
}

#[derive(Deserialize)]
struct WireHits {
    hits: Vec<WireHit>,
}

#[derive(Deserialize)]
struct WireHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: Option<f32>,
}

/// Parse the ranked hit list, keeping engine order. Hit ids arrive in
/// string form; unparseable ones are dropped with a warning rather than
/// failing the whole search.
fn parse_hits(body: &[u8]) -> Result<Vec<SearchHit>, String> {
    let response: WireResponse = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    Ok(response
        .hits
        .hits
        .into_iter()
        .filter_map(|hit| match hit.id.parse::<BookId>() {
            Ok(book_id) => Some(SearchHit {
                book_id,
                score: hit.score.unwrap_or_default(),
            }),
            Err(_) => {
                tracing::warn!(id = %hit.id, "dropping hit with non-numeric id");
                None
            }
        })
        .collect())
}

#[async_trait]
impl SearchEngine for HttpEngine {
    async fn put_document(
        &self,
        book_id: BookId,
        document: &SearchDocument,
    ) -> Result<(), EngineError> {
        let write_error = |reason: String| EngineError::Write { book_id, reason };
        let payload = serde_json::to_vec(document).map_err(|e| write_error(e.to_string()))?;
        let (status, body) = self
            .send(Method::PUT, &self.document_url(book_id), Some(payload))
            .await
            .map_err(|failure| match failure {
                CallFailure::Timeout(timeout) => EngineError::Timeout { timeout },
                CallFailure::Transport(reason) => write_error(reason),
            })?;
        if status.is_success() {
            Ok(())
        } else {
            Err(write_error(format!(
                "engine returned {status}: {}",
                String::from_utf8_lossy(&body)
            )))
        }
    }

    async fn document_exists(&self, book_id: BookId) -> Result<bool, EngineError> {
        let delete_error = |reason: String| EngineError::Delete { book_id, reason };
        let (status, _) = self
            .send(Method::HEAD, &self.document_url(book_id), None)
            .await
            .map_err(|failure| match failure {
                CallFailure::Timeout(timeout) => EngineError::Timeout { timeout },
                CallFailure::Transport(reason) => {
                    delete_error(format!("existence check: {reason}"))
                }
            })?;
        match status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(delete_error(format!("existence check returned {other}"))),
        }
    }

    async fn delete_document(&self, book_id: BookId) -> Result<bool, EngineError> {
        let delete_error = |reason: String| EngineError::Delete { book_id, reason };
        let (status, body) = self
            .send(Method::DELETE, &self.document_url(book_id), None)
            .await
            .map_err(|failure| match failure {
                CallFailure::Timeout(timeout) => EngineError::Timeout { timeout },
                CallFailure::Transport(reason) => delete_error(reason),
            })?;
        match status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(delete_error(format!(
                "engine returned {other}: {}",
                String::from_utf8_lossy(&body)
            ))),
        }
    }

    async fn search(&self, query: &MatchQuery) -> Result<Vec<SearchHit>, EngineError> {
        let search_error = |reason: String| EngineError::Search { reason };
        let payload =
            serde_json::to_vec(&search_body(query)).map_err(|e| search_error(e.to_string()))?;
        let (status, body) = self
            .send(Method::POST, &self.search_url(), Some(payload))
            .await
            .map_err(|failure| match failure {
                CallFailure::Timeout(timeout) => EngineError::Timeout { timeout },
                CallFailure::Transport(reason) => search_error(reason),
            })?;
        if !status.is_success() {
            return Err(search_error(format!(
                "engine returned {status}: {}",
                String::from_utf8_lossy(&body)
            )));
        }
        parse_hits(&body).map_err(search_error)
    }
}
