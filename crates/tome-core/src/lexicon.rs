//! Static lexical data: the English stopword set and the synonym/hypernym
//! network backing semantic query expansion.
//!
//! Both structures are immutable after load. The stopword set is a
//! compile-time perfect hash set; the lexicon is parsed once from an
//! embedded TSV file into a `Vec` of entries plus an FST map over the
//! headwords, and shared by reference across every worker thread.

use fst::Map;
use phf::phf_set;
use std::sync::OnceLock;

/// English stopwords, in normalized (punctuation-stripped, lowercase) form
/// so that membership tests run on already-normalized query tokens.
static STOPWORDS: phf::Set<&'static str> = phf_set! {
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "youre", "youve", "youll", "youd", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "shes", "her",
    "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "thatll", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did",
    "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when",
    "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
    "don", "dont", "should", "shouldve", "now", "d", "ll", "m", "o", "re",
    "ve", "y", "ain", "aren", "arent", "couldn", "couldnt", "didn",
    "didnt", "doesn", "doesnt", "hadn", "hadnt", "hasn", "hasnt", "haven",
    "havent", "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt",
    "needn", "neednt", "shan", "shant", "shouldn", "shouldnt", "wasn",
    "wasnt", "weren", "werent", "won", "wont", "wouldn", "wouldnt",
};

/// True when `token` (already normalized) is an English stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

const LEXICON_TSV: &str = include_str!("../assets/lexicon.tsv");

/// One sense entry: a headword, its synonym terms, and the terms of its
/// direct hypernyms (more general concepts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexEntry {
    pub headword: String,
    pub synonyms: Vec<String>,
    pub hypernyms: Vec<String>,
}

/// The synonym/hypernym network, indexed by an FST over headwords.
pub struct Lexicon {
    entries: Vec<LexEntry>,
    index: Map<Vec<u8>>,
}

impl Lexicon {
    /// The shared process-wide lexicon, parsed from the embedded TSV on
    /// first access.
    pub fn global() -> &'static Lexicon {
        static LEXICON: OnceLock<Lexicon> = OnceLock::new();
        LEXICON.get_or_init(|| {
            Lexicon::parse(LEXICON_TSV).expect("embedded lexicon must be valid TSV")
        })
    }

    /// Parse a TSV lexicon: `headword<TAB>synonyms<TAB>hypernyms` per line,
    /// comma-separated term lists, `#` comments and blank lines skipped.
    pub fn parse(src: &str) -> Result<Self, String> {
        let mut entries = Vec::new();
        for (lineno, line) in src.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split('\t');
            let headword = cols
                .next()
                .filter(|h| !h.is_empty())
                .ok_or_else(|| format!("line {}: missing headword", lineno + 1))?
                .to_string();
            let synonyms = split_terms(cols.next().unwrap_or(""));
            let hypernyms = split_terms(cols.next().unwrap_or(""));
            entries.push(LexEntry {
                headword,
                synonyms,
                hypernyms,
            });
        }

        entries.sort_by(|a, b| a.headword.cmp(&b.headword));
        entries.dedup_by(|a, b| a.headword == b.headword);

        let index = Map::from_iter(
            entries
                .iter()
                .enumerate()
                .map(|(i, e)| (e.headword.as_bytes().to_vec(), i as u64)),
        )
        .map_err(|e| format!("fst build failed: {e}"))?;

        Ok(Self { entries, index })
    }

    /// Look up the sense entry for a (normalized) term.
    pub fn entry(&self, term: &str) -> Option<&LexEntry> {
        self.index.get(term).map(|i| &self.entries[i as usize])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_terms(col: &str) -> Vec<String> {
    col.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
