//! Indexing gateway — owns the per-book search document lifecycle.
//!
//! The catalog layer commits its transaction first and then hands work to
//! this gateway: index jobs travel over a bounded queue to a dispatcher
//! that runs them concurrently, extraction capped by the worker pool. A
//! failed indexing job is logged and discarded — the catalog record is
//! already committed, so the search index is allowed to lag (eventual
//! consistency). Deletions are synchronous because a failed delete can
//! leave stale, discoverable content.

use crate::pool::ExtractionPool;
use crate::storage::{percent_decode, ByteStore};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tome_core::config::IndexingConfig;
use tome_core::error::EngineError;
use tome_core::search::SearchEngine;
use tome_core::types::{BookId, IndexJob};
use tracing::Instrument;

/// Cloneable handle to the indexing pipeline.
#[derive(Clone)]
pub struct Indexer {
    tx: mpsc::Sender<IndexJob>,
    engine: Arc<dyn SearchEngine>,
}

impl Indexer {
    /// Start the dispatcher and return the handle plus its join handle.
    /// The dispatcher drains in-flight jobs and exits once every `Indexer`
    /// clone has been dropped.
    pub fn spawn(
        engine: Arc<dyn SearchEngine>,
        store: Arc<dyn ByteStore>,
        config: &IndexingConfig,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
        let pool = Arc::new(ExtractionPool::new(config.workers));
        let handle = tokio::spawn(dispatch(rx, Arc::clone(&engine), store, pool));
        (Self { tx, engine }, handle)
    }

    /// Enqueue an indexing job for `book_id`. The stored PDF reference is
    /// percent-decoded here; a missing genre becomes the empty string.
    /// Enqueue failures are logged and swallowed like every other indexing
    /// failure — the caller's transaction has already committed.
    pub async fn index_book(&self, book_id: BookId, genre: Option<String>, pdf_reference: &str) {
        let job = IndexJob {
            book_id,
            genre: genre.unwrap_or_default(),
            pdf_reference: percent_decode(pdf_reference),
        };
        if self.tx.send(job).await.is_err() {
            tracing::error!(book_id, "indexing queue is closed; job dropped");
        }
    }

    /// Remove the search document for `book_id`. Absent documents are a
    /// no-op; an engine failure on a confirmed-existing document surfaces
    /// as [`EngineError::Delete`].
    pub async fn delete_book(&self, book_id: BookId) -> Result<(), EngineError> {
        if !self.engine.document_exists(book_id).await? {
            tracing::debug!(book_id, "no search document to delete");
            return Ok(());
        }
        self.engine.delete_document(book_id).await?;
        tracing::info!(book_id, "search document deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Catalog lifecycle invocation points
    // -----------------------------------------------------------------------

    /// A book was created. Indexes only when it carries a PDF reference.
    pub async fn book_created(
        &self,
        book_id: BookId,
        genre: Option<String>,
        pdf_reference: Option<&str>,
    ) {
        if let Some(reference) = non_empty(pdf_reference) {
            self.index_book(book_id, genre, reference).await;
        }
    }

    /// A book was updated. Acts only when the PDF reference changed: the
    /// old document is deleted first, and a new one is built only when a
    /// new reference is present, using the post-update genre.
    pub async fn book_updated(
        &self,
        book_id: BookId,
        genre: Option<String>,
        old_reference: Option<&str>,
        new_reference: Option<&str>,
    ) -> Result<(), EngineError> {
        let old = non_empty(old_reference);
        let new = non_empty(new_reference);
        if old == new {
            return Ok(());
        }
        if old.is_some() {
            self.delete_book(book_id).await?;
        }
        if let Some(reference) = new {
            self.index_book(book_id, genre, reference).await;
        }
        Ok(())
    }

    /// A book was deleted. Touches the engine only when the book had a PDF
    /// reference (and therefore may have a search document).
    pub async fn book_deleted(
        &self,
        book_id: BookId,
        pdf_reference: Option<&str>,
    ) -> Result<(), EngineError> {
        if non_empty(pdf_reference).is_none() {
            return Ok(());
        }
        self.delete_book(book_id).await
    }
}

fn non_empty(reference: Option<&str>) -> Option<&str> {
    reference.filter(|r| !r.is_empty())
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

async fn dispatch(
    mut rx: mpsc::Receiver<IndexJob>,
    engine: Arc<dyn SearchEngine>,
    store: Arc<dyn ByteStore>,
    pool: Arc<ExtractionPool>,
) {
    let mut in_flight = JoinSet::new();
    while let Some(job) = rx.recv().await {
        let span = tracing::info_span!("index_job", book_id = job.book_id);
        in_flight.spawn(
            process_job(job, Arc::clone(&engine), Arc::clone(&store), Arc::clone(&pool))
                .instrument(span),
        );
        // Reap finished jobs eagerly so the set does not grow unbounded.
        while in_flight.try_join_next().is_some() {}
    }
    while in_flight.join_next().await.is_some() {}
}

/// One indexing job: fetch bytes, extract off-thread, upsert the document.
/// Every failure is logged and swallowed.
async fn process_job(
    job: IndexJob,
    engine: Arc<dyn SearchEngine>,
    store: Arc<dyn ByteStore>,
    pool: Arc<ExtractionPool>,
) {
    let bytes = match store.download_bytes(&job.pdf_reference).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(%error, reference = %job.pdf_reference, "download failed; book stays unindexed");
            return;
        }
    };

    let document = match pool.extract(job.genre, bytes).await {
        Ok(document) => document,
        Err(error) => {
            tracing::warn!(%error, "extraction failed; book stays unindexed");
            return;
        }
    };

    match engine.put_document(job.book_id, &document).await {
        Ok(()) => tracing::info!(chars = document.content.len(), "book indexed"),
        Err(error) => {
            tracing::warn!(%error, "index write failed; book stays unindexed");
        }
    }
}
