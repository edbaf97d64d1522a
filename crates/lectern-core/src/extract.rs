//! Keyword-frequency concept extraction and plain-text summaries.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::model::Concept;
use crate::stopwords::Stopwords;

/// Default number of concepts returned per document.
pub const DEFAULT_MAX_CONCEPTS: usize = 5;

/// Only this many surviving tokens are counted per document.
pub const DEFAULT_TOKEN_CAP: usize = 20_000;

/// Summaries are cut to this many characters.
pub const SUMMARY_MAX_CHARS: usize = 400;

/// Returned when a document has no non-blank lines.
pub const SUMMARY_FALLBACK: &str = "No summary available.";

const TOKEN_PATTERN: &str = r"[A-Za-z][A-Za-z\-]{2,}";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Ranks the most frequent non-stopword tokens of a text.
#[derive(Debug, Clone)]
pub struct ConceptExtractor {
    stopwords: Stopwords,
    token_cap: usize,
}

impl Default for ConceptExtractor {
    fn default() -> Self {
        Self::new(Stopwords::english())
    }
}

impl ConceptExtractor {
    pub fn new(stopwords: Stopwords) -> Self {
        Self {
            stopwords,
            token_cap: DEFAULT_TOKEN_CAP,
        }
    }

    /// Override how many surviving tokens are considered.
    pub fn with_token_cap(mut self, token_cap: usize) -> Self {
        self.token_cap = token_cap;
        self
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Lowercased tokens of `text` that are not stopwords, in document order.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        token_regex()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|w| !self.stopwords.contains(w))
            .map(str::to_string)
            .collect()
    }

    /// The `max_concepts` most frequent tokens as concepts.
    ///
    /// Equal counts keep first-occurrence order. Only the first `token_cap`
    /// surviving tokens are counted.
    pub fn extract(&self, text: &str, max_concepts: usize) -> Vec<Concept> {
        if max_concepts == 0 {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for token in token_regex()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|w| !self.stopwords.contains(w))
            .take(self.token_cap)
        {
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        // stable: ties stay in insertion (first-occurrence) order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        tracing::debug!(
            distinct = ranked.len(),
            max_concepts,
            "ranked candidate tokens"
        );

        ranked
            .into_iter()
            .take(max_concepts)
            .map(|(token, _)| Concept::key_term(token.to_string()))
            .collect()
    }
}

/// Extract concepts with the built-in English stopwords.
pub fn extract_concepts(text: &str, max_concepts: usize) -> Vec<Concept> {
    ConceptExtractor::default().extract(text, max_concepts)
}

/// Characters that end a line: `\n`, `\r`, vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators. `\r\n` leaves an empty piece, which is dropped as blank.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Join all non-blank lines with single spaces and keep the first
/// [`SUMMARY_MAX_CHARS`] characters.
///
/// Page breaks (form feeds) in text decoded from slides count as line ends.
pub fn summarize(text: &str) -> String {
    let joined = text
        .split(is_line_boundary)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        return SUMMARY_FALLBACK.to_string();
    }
    joined.chars().take(SUMMARY_MAX_CHARS).collect()
}
