//! Engine error taxonomy.
//!
//! Write failures are background side effects and get logged and swallowed
//! at the indexing gateway; delete failures on a confirmed-existing
//! document and search failures propagate to the caller.

use crate::types::BookId;
use std::time::Duration;
use thiserror::Error;

/// Failure talking to the search engine, classified by operation.
///
/// Existence probes only run inside the deletion protocol, so backends
/// classify their failures as [`EngineError::Delete`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// Upserting the document for `book_id` failed.
    #[error("failed to write search document for book {book_id}: {reason}")]
    Write { book_id: BookId, reason: String },

    /// Deleting (or probing) the document for `book_id` failed.
    #[error("failed to delete search document for book {book_id}: {reason}")]
    Delete { book_id: BookId, reason: String },

    /// The match query could not be executed. Retryable; never stands in
    /// for an empty result set.
    #[error("search query failed: {reason}")]
    Search { reason: String },

    /// The engine call did not complete within the configured budget.
    #[error("engine call timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

impl EngineError {
    /// True for failures worth retrying as-is (transient transport states).
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::Timeout { .. })
    }
}
