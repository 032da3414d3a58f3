//! PDF text extraction.
//!
//! Turns raw PDF bytes into the normalized [`SearchDocument`] content. Pure
//! with respect to its input — no network or database access — so it is
//! safe to run on a blocking worker thread.

use crate::storage::StoreError;
use lopdf::Document;
use thiserror::Error;
use tome_core::normalize::normalize;
use tome_core::types::SearchDocument;

/// Why an extraction job failed. Fatal for that one job; never retried
/// automatically.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The byte stream is not a parseable PDF.
    #[error("not a parseable PDF: {0}")]
    Unparsable(String),

    /// The source bytes could not be fetched from storage.
    #[error("failed to fetch source bytes: {0}")]
    Storage(#[from] StoreError),

    /// The blocking worker was cancelled or panicked.
    #[error("extraction worker failed: {0}")]
    Worker(String),
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract and normalize the text of every page.
    ///
    /// Pages yielding no text are skipped, not an error: a PDF with no
    /// extractable text produces an empty `content`. Only an unparseable
    /// byte stream fails.
    pub fn extract(genre: &str, bytes: &[u8]) -> Result<SearchDocument, ExtractionError> {
        let document =
            Document::load_mem(bytes).map_err(|e| ExtractionError::Unparsable(e.to_string()))?;

        let mut pages = Vec::new();
        for (&number, _) in document.get_pages().iter() {
            let Ok(raw) = document.extract_text(&[number]) else {
                continue;
            };
            let normalized = normalize(&raw);
            if !normalized.is_empty() {
                pages.push(normalized);
            }
        }

        Ok(SearchDocument::new(genre, pages.join(" ")))
    }
}
