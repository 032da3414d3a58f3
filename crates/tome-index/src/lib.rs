//! tome-index — the indexing side of tome.
//!
//! Uploaded PDFs become searchable documents here: the byte-store client
//! fetches the file, the extractor parses and normalizes it on a bounded
//! blocking pool, and the indexing gateway writes the result into the
//! engine, keyed by book id. The gateway also owns the catalog lifecycle
//! rules (create / update / delete) for search documents.

pub mod extract;
pub mod indexer;
pub mod pool;
pub mod storage;

#[cfg(test)]
mod test_pdf;

pub use extract::{ExtractionError, PdfExtractor};
pub use indexer::Indexer;
pub use pool::ExtractionPool;
pub use storage::{ByteStore, HttpStore, MemoryStore, StoreError};
