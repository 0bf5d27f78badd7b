//! Engine configuration
//!
//! Built once by the CLI and handed to each engine at construction.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::file_reader::EncodingStrategy;

/// Fixed size of one catalog record in bytes
pub const LINE_SIZE: usize = 200;

/// Default catalog location, relative to the working directory
pub const DEFAULT_RECORDS_PATH: &str = "info/fictional_books.txt";

/// Default document collection, relative to the working directory
pub const DEFAULT_BOOKS_DIR: &str = "books";

/// Extension of scanned documents
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbConfig {
    /// Fixed-width catalog file
    pub records_path: PathBuf,

    /// Directory holding the text documents
    pub documents_dir: PathBuf,

    /// Bytes per record
    pub line_size: usize,

    /// Only files with this extension are scanned
    pub document_extension: String,

    /// How documents with invalid UTF-8 are handled
    pub encoding: EncodingStrategy,

    /// Load the whole catalog into memory instead of seeking per read
    pub preload: bool,
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from(DEFAULT_RECORDS_PATH),
            documents_dir: PathBuf::from(DEFAULT_BOOKS_DIR),
            line_size: LINE_SIZE,
            document_extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
            encoding: EncodingStrategy::default(),
            preload: false,
        }
    }
}

impl KbConfig {
    pub fn with_records(mut self, path: impl Into<PathBuf>) -> Self {
        self.records_path = path.into();
        self
    }

    pub fn with_documents(mut self, dir: impl Into<PathBuf>) -> Self {
        self.documents_dir = dir.into();
        self
    }
}
