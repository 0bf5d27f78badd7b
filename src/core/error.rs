//! Error kinds shared by the record and phrase engines
//!
//! "Not found" is never an error: lookups return `Option`/empty collections.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by the engines
#[derive(Debug, Error)]
pub enum KbError {
    /// Index math went outside the record file
    #[error("record index {index} is out of range (total records: {total})")]
    OutOfRange { index: u64, total: u64 },

    /// A record line did not split into four delimited fields
    #[error("malformed record at index {index}")]
    MalformedRecord { index: u64 },

    /// Missing file/directory, permission error or undecodable content
    #[error("{}: {reason}", path.display())]
    ResourceUnavailable { path: PathBuf, reason: String },

    /// A record id that is not a (prefixed) number of at most six digits
    #[error("invalid record id '{0}' (expected ID-NNNNNN or NNNNNN)")]
    InvalidId(String),
}

impl KbError {
    pub fn unavailable(path: &Path, reason: impl ToString) -> Self {
        KbError::ResourceUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Stable code used when the error is embedded in a result item
    pub fn code(&self) -> &'static str {
        match self {
            KbError::OutOfRange { .. } => "OUT_OF_RANGE",
            KbError::MalformedRecord { .. } => "MALFORMED_RECORD",
            KbError::ResourceUnavailable { .. } => "RESOURCE_UNAVAILABLE",
            KbError::InvalidId(_) => "INVALID_ID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KbError::OutOfRange { index: 7, total: 5 };
        assert_eq!(
            err.to_string(),
            "record index 7 is out of range (total records: 5)"
        );

        let err = KbError::unavailable(Path::new("books/a.txt"), "permission denied");
        assert_eq!(err.to_string(), "books/a.txt: permission denied");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(KbError::MalformedRecord { index: 0 }.code(), "MALFORMED_RECORD");
        assert_eq!(KbError::InvalidId("x".into()).code(), "INVALID_ID");
    }
}
