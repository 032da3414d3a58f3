//! tome-engine — search engine backends for tome.
//!
//! Two implementations of [`tome_core::search::SearchEngine`]: the
//! [`HttpEngine`] wire client for a real full-text engine, and the
//! deterministic [`MemoryEngine`] used by tests, benches, and local
//! development.

pub mod http;
pub mod memory;

pub use http::HttpEngine;
pub use memory::MemoryEngine;
