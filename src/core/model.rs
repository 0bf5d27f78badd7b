//! Unified Result Model
//!
//! Every command maps its engine output to this model before rendering.

use serde::{Deserialize, Serialize};

use crate::core::error::KbError;
use crate::records::record::Record;

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Record,
    Match,
    Document,
    Stats,
    Error,
}

/// Line-based range, 1-indexed and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Error information for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: String,
    pub message: String,
}

impl Issue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&KbError> for Issue {
    fn from(err: &KbError) -> Self {
        Issue::new(err.code(), err.to_string())
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Document file name (matches, documents, per-document errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Matched line range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<LineRange>,

    /// Catalog entry for record results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,

    /// Raw matched text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured payload (stats)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(default)]
    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Issue>,
}

impl ResultItem {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            path: None,
            range: None,
            record: None,
            excerpt: None,
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a record result
    pub fn record(record: Record) -> Self {
        Self {
            record: Some(record),
            ..Self::empty(Kind::Record)
        }
    }

    /// Create a phrase match result
    pub fn match_result(path: impl Into<String>, range: LineRange, excerpt: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            range: Some(range),
            excerpt: Some(excerpt.into()),
            ..Self::empty(Kind::Match)
        }
    }

    /// Create a document listing result
    pub fn document(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::empty(Kind::Document)
        }
    }

    /// Create a stats result
    pub fn stats(data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(Kind::Stats)
        }
    }

    /// Create an error result
    pub fn error(issue: Issue) -> Self {
        Self {
            errors: vec![issue],
            ..Self::empty(Kind::Error)
        }
    }

    /// Set the associated path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    /// Echo of the query, shown by human-oriented formats only
    #[serde(skip)]
    pub query: Option<String>,

    pub items: Vec<ResultItem>,
}

impl ResultSet {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items that carry actual results (everything but errors)
    pub fn hits(&self) -> impl Iterator<Item = &ResultItem> {
        self.items.iter().filter(|item| item.kind != Kind::Error)
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            query: None,
            items: iter.into_iter().collect(),
        }
    }
}
