//! Fixed-width record store
//!
//! Every record occupies exactly `line_size` bytes, so record `i` lives at
//! byte offset `i * line_size`. Nothing is cached between calls: each read
//! is one positioned read against the underlying [`RecordSource`].

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::core::config::KbConfig;
use crate::core::error::KbError;
use crate::records::record::Record;

/// Random-access bytes backing a record store
pub trait RecordSource: Send + Sync {
    /// Total size in bytes
    fn size(&self) -> Result<u64, KbError>;

    /// Fill `buf` with the bytes starting at `offset`
    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), KbError>;
}

impl<T: RecordSource + ?Sized> RecordSource for Box<T> {
    fn size(&self) -> Result<u64, KbError> {
        (**self).size()
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), KbError> {
        (**self).read_exact_at(offset, buf)
    }
}

/// Reads straight from the file, opening a fresh handle per call
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self, KbError> {
        let metadata = fs::metadata(path).map_err(|e| KbError::unavailable(path, e))?;
        if !metadata.is_file() {
            return Err(KbError::unavailable(path, "not a regular file"));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl RecordSource for FileSource {
    fn size(&self) -> Result<u64, KbError> {
        fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| KbError::unavailable(&self.path, e))
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), KbError> {
        let mut file = File::open(&self.path).map_err(|e| KbError::unavailable(&self.path, e))?;
        file.seek(SeekFrom::Start(offset))
            .and_then(|_| file.read_exact(buf))
            .map_err(|e| KbError::unavailable(&self.path, e))
    }
}

/// The whole catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn load(path: &Path) -> Result<Self, KbError> {
        let bytes = fs::read(path).map_err(|e| KbError::unavailable(path, e))?;
        Ok(Self::new(bytes))
    }
}

impl RecordSource for MemorySource {
    fn size(&self) -> Result<u64, KbError> {
        Ok(self.bytes.len() as u64)
    }

    fn read_exact_at(&self, offset: u64, buf: &mut [u8]) -> Result<(), KbError> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let slice = start
            .checked_add(buf.len())
            .and_then(|end| self.bytes.get(start..end))
            .ok_or_else(|| KbError::unavailable(Path::new("<memory>"), "short read"))?;
        buf.copy_from_slice(slice);
        Ok(())
    }
}

/// One record slot as stored, padding trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine(String);

impl RawLine {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fixed-width random access over a catalog
#[derive(Debug, Clone)]
pub struct RecordStore<S> {
    source: S,
    line_size: usize,
}

impl RecordStore<Box<dyn RecordSource>> {
    /// Open the configured catalog, preloading it into memory when asked
    pub fn open(config: &KbConfig) -> Result<Self, KbError> {
        let source: Box<dyn RecordSource> = if config.preload {
            Box::new(MemorySource::load(&config.records_path)?)
        } else {
            Box::new(FileSource::open(&config.records_path)?)
        };
        Ok(RecordStore::new(source, config.line_size))
    }
}

impl<S: RecordSource> RecordStore<S> {
    pub fn new(source: S, line_size: usize) -> Self {
        Self { source, line_size }
    }

    pub fn line_size(&self) -> usize {
        self.line_size
    }

    /// Size of the underlying catalog in bytes
    pub fn size_bytes(&self) -> Result<u64, KbError> {
        self.source.size()
    }

    /// Number of complete records; a trailing partial record is ignored
    pub fn total_records(&self) -> Result<u64, KbError> {
        if self.line_size == 0 {
            return Ok(0);
        }
        Ok(self.source.size()? / self.line_size as u64)
    }

    /// Read the record slot at `index`
    pub fn read_record_at(&self, index: u64) -> Result<RawLine, KbError> {
        let total = self.total_records()?;
        if index >= total {
            return Err(KbError::OutOfRange { index, total });
        }

        let mut buf = vec![0u8; self.line_size];
        self.source
            .read_exact_at(index * self.line_size as u64, &mut buf)?;

        Ok(RawLine(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    /// Id of a well-formed line, `None` for a malformed one
    pub fn extract_id(line: &RawLine) -> Option<String> {
        Record::parse(line.as_str()).map(|record| record.id)
    }
}
