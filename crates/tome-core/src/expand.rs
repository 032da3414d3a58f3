//! Query expansion for semantic search.
//!
//! A free-text query is normalized, stripped of stopwords, and widened with
//! every synonym and direct-hypernym term the lexicon knows for the
//! surviving tokens. The result is the union of original tokens and related
//! terms, joined into one query string for the permissive (any-term) match
//! mode.

use crate::lexicon::{is_stopword, Lexicon};
use crate::normalize::normalize;
use std::collections::BTreeSet;

/// Expand a raw query into its semantic term set, returned as a single
/// space-joined string.
///
/// Multi-word lexicon terms are underscore-joined in storage; the
/// underscores become spaces here so each word participates in matching.
/// The union is a set: duplicates collapse, and the output is emitted in
/// sorted order so equal queries always expand to byte-equal strings.
pub fn expand(query: &str) -> String {
    expand_with(Lexicon::global(), query)
}

/// [`expand`] against an explicit lexicon. The production path always uses
/// the shared global instance; tests substitute small hand-built networks.
pub fn expand_with(lexicon: &Lexicon, query: &str) -> String {
    let normalized = normalize(query);
    let tokens: Vec<&str> = normalized
        .split_whitespace()
        .filter(|t| !is_stopword(t))
        .collect();

    let mut terms: BTreeSet<String> = tokens.iter().map(|t| t.to_string()).collect();
    for token in &tokens {
        if let Some(entry) = lexicon.entry(token) {
            for synonym in &entry.synonyms {
                terms.insert(synonym.replace('_', " "));
            }
            for hypernym in &entry.hypernyms {
                terms.insert(hypernym.replace('_', " "));
            }
        }
    }

    terms.into_iter().collect::<Vec<_>>().join(" ")
}
