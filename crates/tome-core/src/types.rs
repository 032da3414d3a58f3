//! Core types for tome-core.
//!
//! This module defines the data structures shared across all pipeline
//! layers: the per-book [`SearchDocument`], the transient [`IndexJob`] and
//! [`SearchHit`] values, and the [`SearchMode`] discriminant.

use serde::{Deserialize, Serialize};

/// Catalog book identifier. The engine stores ids in string form on the
/// wire; everywhere else they are plain integers.
pub type BookId = i64;

/// The per-book document stored in the search engine.
///
/// Derivative data: fully reconstructible from the catalog's PDF reference,
/// so it may be deleted and rebuilt at any time. Every content change is
/// delete-then-recreate, never an in-place merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Genre name. Empty when the catalog record has none.
    pub genre: String,
    /// Concatenated normalized page text.
    pub content: String,
}

impl SearchDocument {
    pub fn new(genre: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            content: content.into(),
        }
    }
}

/// A unit of indexing work handed from the catalog layer to the indexing
/// gateway's queue. PDF bytes are fetched by the worker, not carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexJob {
    pub book_id: BookId,
    /// Genre at enqueue time; `""` when the book has none.
    pub genre: String,
    /// Storage reference for the uploaded PDF, as stored by the catalog
    /// (possibly percent-encoded).
    pub pdf_reference: String,
}

/// A ranked hit returned by the engine. Internal to the search executor;
/// callers only ever see the filtered, ordered list of [`BookId`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub book_id: BookId,
    pub score: f32,
}

/// Retrieval mode. Context requires every non-stopword term to match;
/// semantic runs the expanded term set with permissive matching and
/// genre-weighted scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Context,
    Semantic,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Context => write!(f, "context"),
            SearchMode::Semantic => write!(f, "semantic"),
        }
    }
}
