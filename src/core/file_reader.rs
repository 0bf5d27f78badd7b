//! Document reading strategies
//!
//! Provides consistent handling for:
//! - Non-UTF-8 documents (strict rejection or lossy conversion)
//! - Binary files masquerading as text

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::KbError;

/// Bytes inspected for NUL when sniffing binary content
const BINARY_SNIFF_LEN: usize = 8192;

/// Strategy for handling non-UTF-8 content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingStrategy {
    /// Reject the document as unavailable
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD
    Lossy,
}

impl std::str::FromStr for EncodingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(EncodingStrategy::Strict),
            "lossy" => Ok(EncodingStrategy::Lossy),
            _ => Err(format!("Unknown encoding strategy: {}", s)),
        }
    }
}

/// Content of a successfully read document
#[derive(Debug, Clone)]
pub struct DocumentText {
    pub content: String,

    /// Whether invalid UTF-8 had to be replaced
    pub lossy_conversion: bool,
}

/// Read a document as text according to the encoding strategy
pub fn read_document(path: &Path, encoding: EncodingStrategy) -> Result<DocumentText, KbError> {
    let bytes = fs::read(path).map_err(|e| KbError::unavailable(path, e))?;

    let check_len = std::cmp::min(BINARY_SNIFF_LEN, bytes.len());
    if bytes[..check_len].contains(&0) {
        return Err(KbError::unavailable(
            path,
            "file appears to be binary (contains null bytes)",
        ));
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(DocumentText {
            content,
            lossy_conversion: false,
        }),
        Err(err) => match encoding {
            EncodingStrategy::Strict => Err(KbError::unavailable(
                path,
                format!("invalid UTF-8 ({})", err.utf8_error()),
            )),
            EncodingStrategy::Lossy => Ok(DocumentText {
                content: String::from_utf8_lossy(err.as_bytes()).into_owned(),
                lossy_conversion: true,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_read_document_success() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("livro.txt");
        fs::write(&file_path, "Olá, mundo!").unwrap();

        let text = read_document(&file_path, EncodingStrategy::Strict).unwrap();
        assert_eq!(text.content, "Olá, mundo!");
        assert!(!text.lossy_conversion);
    }

    #[test]
    fn test_read_document_strict_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("latin1.txt");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(&[0x4F, 0x6C, 0xE1, 0x20, 0x6D]).unwrap();

        let err = read_document(&file_path, EncodingStrategy::Strict).unwrap_err();
        assert!(matches!(err, KbError::ResourceUnavailable { .. }));
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn test_read_document_lossy_conversion() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("latin1.txt");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(&[0x4F, 0x6C, 0xE1, 0x20, 0x6D]).unwrap();

        let text = read_document(&file_path, EncodingStrategy::Lossy).unwrap();
        assert!(text.lossy_conversion);
        assert!(text.content.starts_with("Ol"));
        assert!(text.content.ends_with(" m"));
    }

    #[test]
    fn test_read_document_binary() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("binary.txt");
        fs::write(&file_path, [0x00, 0x01, 0x02, 0x00]).unwrap();

        let err = read_document(&file_path, EncodingStrategy::Lossy).unwrap_err();
        assert!(err.to_string().contains("binary"));
    }

    #[test]
    fn test_read_nonexistent_document() {
        let err = read_document(Path::new("/nonexistent/livro.txt"), EncodingStrategy::Strict)
            .unwrap_err();
        assert_eq!(err.code(), "RESOURCE_UNAVAILABLE");
    }

    #[test]
    fn test_encoding_strategy_parse() {
        assert_eq!("strict".parse::<EncodingStrategy>().unwrap(), EncodingStrategy::Strict);
        assert_eq!("LOSSY".parse::<EncodingStrategy>().unwrap(), EncodingStrategy::Lossy);
        assert!("utf16".parse::<EncodingStrategy>().is_err());
    }
}
