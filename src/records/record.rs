//! Catalog record model and line parsing
//!
//! Line format: `ID-000123 | Title | Author | Description`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::KbError;

/// Literal prefix in front of the numeric id
pub const ID_PREFIX: &str = "ID-";

/// Digits in a canonical id
pub const ID_WIDTH: usize = 6;

/// Separates the four record fields
pub const FIELD_DELIMITER: char = '|';

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Zero-padded numeric id, without prefix
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            description: description.into(),
        }
    }

    /// Parse a trimmed record line, `None` when it is malformed.
    ///
    /// The line must split into four fields; the last one keeps any
    /// further delimiters. An empty id is malformed as well.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.splitn(4, FIELD_DELIMITER).map(str::trim);

        let id = strip_id_prefix(fields.next()?);
        let title = fields.next()?;
        let author = fields.next()?;
        let description = fields.next()?;

        if id.is_empty() {
            return None;
        }

        Some(Self::new(id, title, author, description))
    }
}

/// Remove a leading `ID-` if present
pub fn strip_id_prefix(id: &str) -> &str {
    id.strip_prefix(ID_PREFIX).unwrap_or(id)
}

/// A validated, canonical record id (six digits, no prefix)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = KbError;

    /// Accepts `ID-000123`, `000123` and shorter numbers such as `123`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_id_prefix(s.trim());

        if digits.is_empty()
            || digits.len() > ID_WIDTH
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(KbError::InvalidId(s.to_string()));
        }

        Ok(RecordId(format!("{:0>width$}", digits, width = ID_WIDTH)))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ID_PREFIX, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record =
            Record::parse("ID-000001 | Dom Casmurro | Machado de Assis | Romance classico")
                .unwrap();
        assert_eq!(record.id, "000001");
        assert_eq!(record.title, "Dom Casmurro");
        assert_eq!(record.author, "Machado de Assis");
        assert_eq!(record.description, "Romance classico");
    }

    #[test]
    fn test_parse_record_without_prefix() {
        let record = Record::parse("000042|A|B|C").unwrap();
        assert_eq!(record.id, "000042");
        assert_eq!(record.description, "C");
    }

    #[test]
    fn test_parse_description_keeps_extra_delimiters() {
        let record = Record::parse("ID-000007 | T | A | uma | descricao").unwrap();
        assert_eq!(record.description, "uma | descricao");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(Record::parse("").is_none());
        assert!(Record::parse("ID-000001 | Titulo | Autor").is_none());
        assert!(Record::parse("just some text").is_none());
        assert!(Record::parse(" | T | A | D").is_none());
        assert!(Record::parse("ID- | T | A | D").is_none());
    }

    #[test]
    fn test_line_round_trip() {
        let record = Record::new("000123", "Iracema", "José de Alencar", "Romance indianista");
        let line = crate::records::store::testutil::record_line(&record);
        assert_eq!(line, "ID-000123 | Iracema | José de Alencar | Romance indianista");
        assert_eq!(Record::parse(&line), Some(record));
    }

    #[test]
    fn test_strip_id_prefix() {
        assert_eq!(strip_id_prefix("ID-000010"), "000010");
        assert_eq!(strip_id_prefix("000010"), "000010");
    }

    #[test]
    fn test_record_id_parse() {
        assert_eq!("ID-000123".parse::<RecordId>().unwrap().as_str(), "000123");
        assert_eq!("000123".parse::<RecordId>().unwrap().as_str(), "000123");
        assert_eq!("42".parse::<RecordId>().unwrap().as_str(), "000042");
        assert_eq!(" ID-7 ".parse::<RecordId>().unwrap().as_str(), "000007");
    }

    #[test]
    fn test_record_id_rejects_invalid() {
        assert!("".parse::<RecordId>().is_err());
        assert!("ID-".parse::<RecordId>().is_err());
        assert!("ID-1234567".parse::<RecordId>().is_err());
        assert!("abc".parse::<RecordId>().is_err());
        assert!("-12".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_record_id_display() {
        let id: RecordId = "15".parse().unwrap();
        assert_eq!(id.to_string(), "ID-000015");
    }

    #[test]
    fn test_record_serialization() {
        let record = Record::new("000001", "T", "A", "D");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":"000001","title":"T","author":"A","description":"D"}"#
        );
    }
}
