//! tome-core — book indexing & search core library.
//!
//! This crate exposes the pipeline layers shared by the indexing and query
//! sides, plus the types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! PDF bytes ──► Extractor ──► SearchDocument ──► Engine
//!                                                  ▲
//!            Query ──► Expander ──► Executor ──────┘
//! ```
//!
//! Indexing work travels over `tokio` channels into a bounded worker pool;
//! queries run inline on the request path. The lexicon and stopword set are
//! loaded once and shared immutably.

pub mod config;
pub mod error;
pub mod expand;
pub mod lexicon;
pub mod normalize;
pub mod search;
pub mod types;

pub use types::{BookId, IndexJob, SearchDocument, SearchHit, SearchMode};
