//! Bounded worker pool for CPU-bound PDF extraction.
//!
//! Parsing a large PDF must never stall the event loop, so extraction runs
//! on blocking worker threads, with a semaphore capping how many run at
//! once. The cap is a configuration value; 4 is the default.

use crate::extract::{ExtractionError, PdfExtractor};
use tokio::sync::Semaphore;
use tome_core::types::SearchDocument;

pub struct ExtractionPool {
    permits: Semaphore,
    workers: usize,
}

impl ExtractionPool {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            permits: Semaphore::new(workers),
            workers,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run one extraction under a pool permit. Waits when all workers are
    /// busy; the permit is held until the blocking task finishes.
    pub async fn extract(
        &self,
        genre: String,
        bytes: Vec<u8>,
    ) -> Result<SearchDocument, ExtractionError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ExtractionError::Worker(e.to_string()))?;

        tokio::task::spawn_blocking(move || PdfExtractor::extract(&genre, &bytes))
            .await
            .map_err(|e| ExtractionError::Worker(e.to_string()))?
    }
}
