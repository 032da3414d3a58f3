//! In-memory search engine backend.
//!
//! A deterministic stand-in for the real engine, used by tests, benches,
//! and local development. Scoring is a simplified most-fields model: each
//! query term contributes `boost × Σ 1/(1+edit_distance)` over the field
//! tokens it matches within the fuzziness budget, fields are summed, and
//! the operator decides whether every term must match (`And`) or any
//! (`Or`). Ties break by ascending book id so runs are reproducible.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;
use tome_core::error::EngineError;
use tome_core::search::{MatchQuery, SearchEngine, TermOperator};
use tome_core::types::{BookId, SearchDocument, SearchHit};

struct StoredDocument {
    genre_tokens: Vec<String>,
    content_tokens: Vec<String>,
}

impl StoredDocument {
    fn new(document: &SearchDocument) -> Self {
        Self {
            genre_tokens: tokenize(&document.genre),
            content_tokens: tokenize(&document.content),
        }
    }

    fn field_tokens(&self, field: &str) -> &[String] {
        match field {
            "genre" => &self.genre_tokens,
            "content" => &self.content_tokens,
            _ => &[],
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Engine backend holding documents in a `BTreeMap`. Cheap to clone the
/// handle via `Arc`; interior mutability keeps the trait methods `&self`.
#[derive(Default)]
pub struct MemoryEngine {
    documents: RwLock<BTreeMap<BookId, StoredDocument>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self) -> usize {
        self.documents.read().expect("engine lock poisoned").len()
    }
}

#[async_trait]
impl SearchEngine for MemoryEngine {
    async fn put_document(
        &self,
        book_id: BookId,
        document: &SearchDocument,
    ) -> Result<(), EngineError> {
        self.documents
            .write()
            .expect("engine lock poisoned")
            .insert(book_id, StoredDocument::new(document));
        Ok(())
    }

    async fn document_exists(&self, book_id: BookId) -> Result<bool, EngineError> {
        Ok(self
            .documents
            .read()
            .expect("engine lock poisoned")
            .contains_key(&book_id))
    }

    async fn delete_document(&self, book_id: BookId) -> Result<bool, EngineError> {
        Ok(self
            .documents
            .write()
            .expect("engine lock poisoned")
            .remove(&book_id)
            .is_some())
    }

    async fn search(&self, query: &MatchQuery) -> Result<Vec<SearchHit>, EngineError> {
        let terms: Vec<String> = tokenize(&query.query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let documents = self.documents.read().expect("engine lock poisoned");
        let mut hits: Vec<SearchHit> = Vec::new();

        for (&book_id, stored) in documents.iter() {
            let mut score = 0.0f32;
            let mut matched_terms = 0usize;

            for term in &terms {
                let max_edits = query.fuzziness.max_edits(term.chars().count());
                let mut term_score = 0.0f32;
                for fb in &query.fields {
                    for token in stored.field_tokens(fb.field) {
                        if let Some(distance) = edit_distance_within(term, token, max_edits) {
                            term_score += fb.boost / (1.0 + distance as f32);
                        }
                    }
                }
                if term_score > 0.0 {
                    matched_terms += 1;
                    score += term_score;
                }
            }

            let qualifies = match query.operator {
                TermOperator::And => matched_terms == terms.len(),
                TermOperator::Or => matched_terms > 0,
            };
            if qualifies {
                hits.push(SearchHit { book_id, score });
            }
        }

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.book_id.cmp(&b.book_id))
        });
        Ok(hits)
    }
}

/// Levenshtein distance between `a` and `b`, if it does not exceed `cap`.
fn edit_distance_within(a: &str, b: &str, cap: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > cap {
        return None;
    }
    if a == b {
        return Some(0);
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![i + 1];
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current.push(substitution.min(previous[j + 1] + 1).min(current[j] + 1));
        }
        previous = current;
    }

    let distance = previous[b.len()];
    (distance <= cap).then_some(distance)
}
