//! Static book corpora used across harnesses.
//!
//! Rows are `(book_id, genre, content)` in the normalized form the
//! extractor would produce. Content is chosen so that fuzzy matching never
//! bridges between unrelated rows (no pair of salient words within edit
//! distance 2).

use tome_core::types::BookId;

/// A small mixed-genre library.
pub const LIBRARY: &[(BookId, &str, &str)] = &[
    (1, "fantasy", "a young wizard studies magic and befriends a dragon"),
    (2, "fantasy", "a knight rides through the kingdom to the castle"),
    (3, "mystery", "a detective follows a clue to solve the murder"),
    (4, "scifi", "a robot pilots a spaceship toward a distant planet"),
    (5, "adventure", "a pirate hunts buried treasure across the ocean"),
    (7, "fantasy", "a wizard battles a dragon"),
];

/// Rows for the semantic-superset property: book 20 uses the literal term
/// `sorcerer`, book 21 only its synonym `wizard`.
pub const SYNONYM_SPLIT: &[(BookId, &str, &str)] = &[
    (20, "fantasy", "the sorcerer seals the tower gate"),
    (21, "fantasy", "the wizard seals the tower gate"),
];

/// Queries whose context results must be contained in their semantic
/// results over [`LIBRARY`] ∪ [`SYNONYM_SPLIT`].
pub const SUPERSET_QUERIES: &[&str] = &["sorcerer", "wizard", "detective", "treasure hunt"];
