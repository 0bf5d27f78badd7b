//! Documents and the directory collection they live in
//!
//! Uses walkdir for a single-level, filename-sorted listing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::core::config::KbConfig;
use crate::core::error::KbError;
use crate::core::file_reader::{read_document, EncodingStrategy};

/// `\r\n`, `\n` and a lone `\r` all end a line
static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\n|\r").expect("Invalid LINE_BREAK_RE regex"));

/// A named text document split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            lines: split_lines(text),
        }
    }

    /// Read a document from disk; the name is its file name
    pub fn load(path: &Path, encoding: EncodingStrategy) -> Result<Self, KbError> {
        let text = read_document(path, encoding)?;
        if text.lossy_conversion {
            warn!(path = %path.display(), "invalid UTF-8 replaced while reading document");
        }
        Ok(Self::new(file_name(path), &text.content))
    }
}

/// Split on any line break; a trailing break does not start another line
fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = LINE_BREAK_RE.split(text).map(String::from).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// A listed document, not yet read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// The documents directly inside a directory with a given extension
#[derive(Debug, Clone)]
pub struct DocumentCollection {
    dir: PathBuf,
    extension: String,
}

impl DocumentCollection {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &KbConfig) -> Self {
        Self::new(&config.documents_dir, &config.document_extension)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List matching documents sorted by file name
    pub fn entries(&self) -> Result<Vec<DocumentEntry>, KbError> {
        if !self.dir.is_dir() {
            return Err(KbError::unavailable(&self.dir, "document directory not found"));
        }

        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.has_extension(path) {
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            entries.push(DocumentEntry {
                name: file_name(path),
                path: path.to_path_buf(),
                size,
            });
        }

        Ok(entries)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
