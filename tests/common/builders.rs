//! Test builders — PDFs, seeded engines, and executors.
//!
//! These are for readability in test assertions, not for production use.
//! They panic on invalid input rather than returning `Result`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::sync::Arc;
use tome_core::config::SearchConfig;
use tome_core::search::{SearchEngine, SearchExecutor};
use tome_core::types::{BookId, SearchDocument};
use tome_engine::MemoryEngine;

// ---------------------------------------------------------------------------
// PDF construction
// ---------------------------------------------------------------------------

/// Fluent builder for in-memory PDFs.
///
/// # Example
///
/// ```rust,ignore
/// let bytes = PdfBuilder::new()
///     .page("Chapter One")
///     .page("Chapter Two")
///     .build();
/// ```
pub struct PdfBuilder {
    pages: Vec<String>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    pub fn page(mut self, text: impl Into<String>) -> Self {
        self.pages.push(text.into());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in &self.pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(text.as_str())]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("content stream must encode"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf must serialize");
        bytes
    }
}

/// One-page PDF with the given text.
pub fn pdf_with_text(text: &str) -> Vec<u8> {
    PdfBuilder::new().page(text).build()
}

// ---------------------------------------------------------------------------
// Engine seeding
// ---------------------------------------------------------------------------

/// Build a [`MemoryEngine`] pre-loaded with `(id, genre, content)` rows.
pub async fn seeded_engine(rows: &[(BookId, &str, &str)]) -> Arc<MemoryEngine> {
    let engine = Arc::new(MemoryEngine::new());
    for (book_id, genre, content) in rows {
        engine
            .put_document(*book_id, &SearchDocument::new(*genre, *content))
            .await
            .expect("memory engine put cannot fail");
    }
    engine
}

/// Executor over `engine` with explicit per-mode thresholds.
pub fn executor_with(
    engine: Arc<MemoryEngine>,
    min_context_score: f32,
    min_semantic_score: f32,
) -> SearchExecutor {
    SearchExecutor::new(
        engine,
        SearchConfig {
            min_context_score,
            min_semantic_score,
        },
    )
}
