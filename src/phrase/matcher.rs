//! Word and phrase matching with single-character wildcards
//!
//! A pattern word matches a text word only when both have the same number
//! of characters and every position is equal or a wildcard in the pattern.

use crate::core::normalize::{normalize, tokenize, WILDCARD};

/// Does `text_word` match `pattern_word` position by position?
pub fn word_matches(text_word: &str, pattern_word: &str) -> bool {
    let mut text = text_word.chars();
    let mut pattern = pattern_word.chars();

    loop {
        match (text.next(), pattern.next()) {
            (None, None) => return true,
            (Some(t), Some(p)) => {
                if p != WILDCARD && p != t {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// Offset of the first contiguous run of `text_words` matching `pattern_words`
pub fn find_sequence<T, P>(text_words: &[T], pattern_words: &[P]) -> Option<usize>
where
    T: AsRef<str>,
    P: AsRef<str>,
{
    if pattern_words.is_empty() || pattern_words.len() > text_words.len() {
        return None;
    }

    (0..=text_words.len() - pattern_words.len()).find(|&start| {
        text_words[start..]
            .iter()
            .zip(pattern_words)
            .all(|(t, p)| word_matches(t.as_ref(), p.as_ref()))
    })
}

/// Is there any offset where the pattern occurs contiguously?
pub fn matches_sequence<T, P>(text_words: &[T], pattern_words: &[P]) -> bool
where
    T: AsRef<str>,
    P: AsRef<str>,
{
    find_sequence(text_words, pattern_words).is_some()
}

/// A normalized query phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    words: Vec<String>,
}

impl Pattern {
    pub fn parse(phrase: &str) -> Self {
        Self {
            words: tokenize(&normalize(phrase)),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// An empty pattern matches nothing
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn matches<T: AsRef<str>>(&self, text_words: &[T]) -> bool {
        matches_sequence(text_words, &self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_matches_wildcard() {
        assert!(word_matches("amor", "am.r"));
        assert!(word_matches("casa", "c.sa"));
        assert!(word_matches("casa", "...."));
    }

    #[test]
    fn test_word_matches_exact() {
        assert!(word_matches("amor", "amor"));
        assert!(!word_matches("amor", "casa"));
    }

    #[test]
    fn test_word_matches_length_mismatch() {
        assert!(!word_matches("amor", "am."));
        assert!(!word_matches("am", "amor"));
        assert!(!word_matches("amor", "amor."));
    }

    #[test]
    fn test_word_matches_counts_characters_not_bytes() {
        assert!(word_matches("ç", "."));
        assert!(!word_matches("", "."));
        assert!(word_matches("", ""));
    }

    #[test]
    fn test_matches_sequence_contiguous() {
        let text = ["o", "amor", "e", "um", "sentimento", "profundo"];
        assert!(matches_sequence(&text, &["o", "amor"]));
        assert!(matches_sequence(&text, &["sentimento", "profundo"]));
        assert!(matches_sequence(&text, &["um", "s.ntimento"]));
        assert!(!matches_sequence(&text, &["o", "e"]));
        assert!(!matches_sequence(&text, &["profundo", "o"]));
    }

    #[test]
    fn test_find_sequence_offset() {
        let text = ["a", "b", "a", "b", "c"];
        assert_eq!(find_sequence(&text, &["a", "b"]), Some(0));
        assert_eq!(find_sequence(&text, &["b", "c"]), Some(3));
        assert_eq!(find_sequence(&text, &["c", "a"]), None);
    }

    #[test]
    fn test_matches_sequence_edge_cases() {
        let empty: [&str; 0] = [];
        assert!(!matches_sequence(&["amor"], &empty));
        assert!(!matches_sequence(&empty, &["amor"]));
        assert!(!matches_sequence(&["o"], &["o", "amor"]));
        assert!(matches_sequence(&["amor"], &["amor"]));
    }

    #[test]
    fn test_pattern_parse() {
        let pattern = Pattern::parse("No nosso JARDIM, havia flores!");
        assert_eq!(pattern.words(), ["no", "nosso", "jardim", "havia", "flores"]);

        let pattern = Pattern::parse("Am.r");
        assert_eq!(pattern.words(), ["am.r"]);
    }

    #[test]
    fn test_pattern_empty() {
        assert!(Pattern::parse("").is_empty());
        assert!(Pattern::parse("?!, ;").is_empty());
        assert!(!Pattern::parse("").matches(&["qualquer", "coisa"]));
    }
}
