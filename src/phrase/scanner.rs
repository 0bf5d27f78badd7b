//! Phrase search across a document collection
//!
//! Each line is normalized and tokenized once. For line `i` the scanner tests
//! the line alone, then (only if that failed) the line joined with line
//! `i + 1`. Every window is tested independently, so adjacent windows can
//! both report a hit.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::core::config::KbConfig;
use crate::core::error::KbError;
use crate::core::file_reader::EncodingStrategy;
use crate::core::normalize::{normalize_text, tokenize};
use crate::phrase::document::{Document, DocumentCollection};
use crate::phrase::matcher::Pattern;

/// A phrase occurrence, lines 1-indexed and inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub filename: String,
    pub start_line: usize,
    pub end_line: usize,

    /// Raw text of the matched line(s)
    pub excerpt: String,
}

/// Lazily yields the matches of one pattern in one document
pub struct DocumentMatches<'a> {
    pattern: &'a Pattern,
    document: &'a Document,
    tokens: Vec<Vec<String>>,
    line: usize,
}

impl Iterator for DocumentMatches<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        if self.pattern.is_empty() {
            return None;
        }

        while self.line < self.tokens.len() {
            let i = self.line;
            self.line += 1;

            if self.pattern.matches(&self.tokens[i]) {
                return Some(self.hit(i, i));
            }

            if let Some(next) = self.tokens.get(i + 1) {
                let window: Vec<&str> = self.tokens[i]
                    .iter()
                    .chain(next)
                    .map(String::as_str)
                    .collect();
                if self.pattern.matches(&window) {
                    return Some(self.hit(i, i + 1));
                }
            }
        }

        None
    }
}

impl DocumentMatches<'_> {
    fn hit(&self, first: usize, last: usize) -> Match {
        Match {
            filename: self.document.name.clone(),
            start_line: first + 1,
            end_line: last + 1,
            excerpt: self.document.lines[first..=last].join("\n"),
        }
    }
}

/// Scan a single in-memory document
pub fn scan_document<'a>(pattern: &'a Pattern, document: &'a Document) -> DocumentMatches<'a> {
    let tokens = if pattern.is_empty() {
        Vec::new()
    } else {
        document
            .lines
            .iter()
            .map(|line| tokenize(&normalize_text(line)))
            .collect()
    };

    DocumentMatches {
        pattern,
        document,
        tokens,
        line: 0,
    }
}

/// Phrase search over the configured document collection
pub struct DocumentScanner {
    collection: DocumentCollection,
    encoding: EncodingStrategy,
}

impl DocumentScanner {
    pub fn new(config: &KbConfig) -> Self {
        Self {
            collection: DocumentCollection::from_config(config),
            encoding: config.encoding,
        }
    }

    pub fn collection(&self) -> &DocumentCollection {
        &self.collection
    }

    /// Start a lazy search for `phrase`.
    ///
    /// Fails only when the collection itself is unavailable. Unreadable
    /// documents surface as `Err` items and the search continues.
    pub fn search(&self, phrase: &str) -> Result<PhraseSearch, KbError> {
        let pattern = Pattern::parse(phrase);
        let pending = if pattern.is_empty() {
            debug!(phrase, "empty pattern, nothing to scan");
            Vec::new()
        } else {
            self.collection
                .entries()?
                .into_iter()
                .map(|entry| entry.path)
                .collect()
        };

        Ok(PhraseSearch {
            pattern,
            encoding: self.encoding,
            pending: pending.into_iter(),
            ready: VecDeque::new(),
        })
    }
}

/// Matches across documents, read one document at a time
pub struct PhraseSearch {
    pattern: Pattern,
    encoding: EncodingStrategy,
    pending: std::vec::IntoIter<PathBuf>,
    ready: VecDeque<Match>,
}

impl PhraseSearch {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl Iterator for PhraseSearch {
    type Item = Result<Match, KbError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(hit) = self.ready.pop_front() {
                return Some(Ok(hit));
            }

            let path = self.pending.next()?;
            match Document::load(&path, self.encoding) {
                Ok(document) => {
                    self.ready.extend(scan_document(&self.pattern, &document));
                    debug!(document = %document.name, hits = self.ready.len(), "scanned");
                }
                Err(err) => {
                    warn!(error = %err, "skipping unreadable document");
                    return Some(Err(err));
                }
            }
        }
    }
}
