//! Search layer — the engine boundary and the mode-aware executor.
//!
//! The engine is a black-box document store with a weighted multi-field
//! match-query API, reached through the object-safe [`SearchEngine`] trait.
//! [`SearchExecutor`] builds the per-mode [`MatchQuery`], runs it, applies
//! the mode's minimum-score threshold, and hands back ranked book ids.

use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::expand::expand;
use crate::normalize::normalize;
use crate::types::{BookId, SearchDocument, SearchHit, SearchMode};
use async_trait::async_trait;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Match query model
// ---------------------------------------------------------------------------

/// How query terms combine: `And` requires every term to match, `Or` any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermOperator {
    And,
    Or,
}

impl std::fmt::Display for TermOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermOperator::And => write!(f, "and"),
            TermOperator::Or => write!(f, "or"),
        }
    }
}

/// Fuzzy-match tolerance. `Auto` scales the permitted edit distance with
/// term length the way the engine's AUTO setting does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    Exact,
    Auto,
}

impl Fuzziness {
    /// Maximum permitted edit distance for a term of `len` characters.
    pub fn max_edits(&self, len: usize) -> usize {
        match self {
            Fuzziness::Exact => 0,
            Fuzziness::Auto => match len {
                0..=2 => 0,
                3..=5 => 1,
                _ => 2,
            },
        }
    }
}

/// A searched field and its score multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBoost {
    pub field: &'static str,
    pub boost: f32,
}

/// The engine-agnostic match query both backends consume: query text,
/// weighted fields, term operator, and fuzziness.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub query: String,
    pub fields: Vec<FieldBoost>,
    pub operator: TermOperator,
    pub fuzziness: Fuzziness,
}

impl MatchQuery {
    /// Context mode: all terms must match, genre and content weigh equally.
    pub fn context(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: vec![
                FieldBoost { field: "genre", boost: 1.0 },
                FieldBoost { field: "content", boost: 1.0 },
            ],
            operator: TermOperator::And,
            fuzziness: Fuzziness::Auto,
        }
    }

    /// Semantic mode: any term may match, genre weighs three times content.
    pub fn semantic(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: vec![
                FieldBoost { field: "genre", boost: 3.0 },
                FieldBoost { field: "content", boost: 1.0 },
            ],
            operator: TermOperator::Or,
            fuzziness: Fuzziness::Auto,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine boundary
// ---------------------------------------------------------------------------

/// The full-text engine boundary: whole-document upsert/delete keyed by
/// book id, plus the ranked match query. Implementations must be safe for
/// concurrent reuse; the core imposes no ordering beyond the engine's own
/// per-document guarantees (concurrent writes are last-write-wins).
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Create or overwrite the document at `book_id`.
    async fn put_document(
        &self,
        book_id: BookId,
        document: &SearchDocument,
    ) -> Result<(), EngineError>;

    /// Whether a document exists at `book_id`. Only called as part of the
    /// deletion protocol; failures classify as [`EngineError::Delete`].
    async fn document_exists(&self, book_id: BookId) -> Result<bool, EngineError>;

    /// Delete the document at `book_id`. Returns `false` when it was
    /// already absent; that is not an error.
    async fn delete_document(&self, book_id: BookId) -> Result<bool, EngineError>;

    /// Run a match query, returning hits ranked by descending score.
    async fn search(&self, query: &MatchQuery) -> Result<Vec<SearchHit>, EngineError>;
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Runs both retrieval modes against an engine and applies the per-mode
/// minimum-score thresholds from config.
pub struct SearchExecutor {
    engine: Arc<dyn SearchEngine>,
    config: SearchConfig,
}

impl SearchExecutor {
    pub fn new(engine: Arc<dyn SearchEngine>, config: SearchConfig) -> Self {
        Self { engine, config }
    }

    /// Literal keyword mode: the normalized query, all terms required.
    pub async fn context_search(&self, query: &str) -> Result<Vec<BookId>, EngineError> {
        self.run(SearchMode::Context, MatchQuery::context(normalize(query)))
            .await
    }

    /// Meaning-aware mode: the lexically expanded query, any term may match.
    pub async fn semantic_search(&self, query: &str) -> Result<Vec<BookId>, EngineError> {
        self.run(SearchMode::Semantic, MatchQuery::semantic(expand(query)))
            .await
    }

    fn min_score(&self, mode: SearchMode) -> f32 {
        match mode {
            SearchMode::Context => self.config.min_context_score,
            SearchMode::Semantic => self.config.min_semantic_score,
        }
    }

    /// Hits strictly below the threshold are discarded; survivors keep the
    /// engine's rank order. An empty result is a valid outcome, never an
    /// error.
    async fn run(&self, mode: SearchMode, query: MatchQuery) -> Result<Vec<BookId>, EngineError> {
        let min_score = self.min_score(mode);
        let hits = self.engine.search(&query).await?;
        let ids: Vec<BookId> = hits
            .iter()
            .filter(|hit| hit.score >= min_score)
            .map(|hit| hit.book_id)
            .collect();
        tracing::debug!(%mode, hits = hits.len(), returned = ids.len(), "search complete");
        Ok(ids)
    }
}
