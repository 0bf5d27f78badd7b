//! Text normalization
//!
//! Canonicalizes text for comparison: accents stripped, lowercased,
//! punctuation collapsed to single spaces.
//!
//! Two flavors share one pipeline:
//! - [`normalize`] keeps the wildcard character, used for query patterns
//! - [`normalize_text`] treats the wildcard as punctuation, used for document lines

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Matches any single character inside a pattern word
pub const WILDCARD: char = '.';

/// Everything that is not a letter, digit, underscore, whitespace or the wildcard
static PATTERN_PUNCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"[^\p{{L}}\p{{N}}_\s{}]",
        regex::escape(&WILDCARD.to_string())
    ))
    .expect("Invalid PATTERN_PUNCT_RE regex")
});

/// Everything that is not a letter, digit, underscore or whitespace
static TEXT_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").expect("Invalid TEXT_PUNCT_RE regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid WHITESPACE_RE regex"));

/// Normalize a query phrase, keeping wildcards
pub fn normalize(text: &str) -> String {
    normalize_with(text, &PATTERN_PUNCT_RE)
}

/// Normalize document text; the wildcard is ordinary punctuation here
pub fn normalize_text(text: &str) -> String {
    normalize_with(text, &TEXT_PUNCT_RE)
}

/// Split a normalized string into its words
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized.split(' ').filter(|w| !w.is_empty()).map(String::from).collect()
}

fn normalize_with(text: &str, punct: &Regex) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = stripped.to_lowercase();
    let spaced = punct.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RE.replace_all(&spaced, " ");

    collapsed.trim().to_string()
}
