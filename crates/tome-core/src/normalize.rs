//! Text normalization shared by the extractor and both search modes.
//!
//! Every page of extracted PDF text and every incoming query passes through
//! [`normalize`] so that indexed content and query terms agree on
//! whitespace, case, and punctuation. The function is idempotent:
//! `normalize(normalize(x)) == normalize(x)` for any input.

use regex::Regex;
use std::sync::OnceLock;

/// ASCII punctuation stripped during normalization.
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

fn newline_tab_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\r\n\t]+").expect("static regex must parse"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex must parse"))
}

/// Normalize a chunk of raw text.
///
/// Steps: newline/tab runs become a single space, punctuation is stripped,
/// remaining whitespace runs collapse to a single space, the result is
/// lowercased and trimmed. Punctuation is removed before the final collapse
/// so that `"a - b"` normalizes straight to `"a b"` and the whole function
/// stays idempotent.
pub fn normalize(text: &str) -> String {
    let text = newline_tab_runs().replace_all(text, " ");
    let text: String = text.chars().filter(|c| !PUNCTUATION.contains(*c)).collect();
    let text = whitespace_runs().replace_all(&text, " ");
    text.to_lowercase().trim().to_string()
}
