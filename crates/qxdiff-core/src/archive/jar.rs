//! Packaged (zip) archives such as extension jars.

use super::{Archive, ArchiveEntry};
use crate::errors::{io_error, DiffError, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const LOCAL_HEADER_MAGIC: &[u8] = b"PK\x03\x04";
const EMPTY_ARCHIVE_MAGIC: &[u8] = b"PK\x05\x06";

/// True when `bytes` start like a zip file (including an empty one)
pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(LOCAL_HEADER_MAGIC) || bytes.starts_with(EMPTY_ARCHIVE_MAGIC)
}

/// A `.jar` or `.zip` held in memory.
///
/// The bytes are only decoded when [`Archive::entries`] is called.
#[derive(Debug, Clone)]
pub struct JarArchive {
    name: String,
    bytes: Vec<u8>,
}

impl JarArchive {
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a packaged archive from disk
    ///
    /// # Errors
    ///
    /// - `Io`: the file could not be read
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| io_error("read_archive", path, e))?;
        Ok(Self::from_bytes(path.display().to_string(), bytes))
    }

    fn unreadable(&self, source: ZipError) -> DiffError {
        DiffError::Archive {
            archive: self.name.clone(),
            source,
        }
    }
}

impl Archive for JarArchive {
    fn name(&self) -> &str {
        &self.name
    }

    /// File entries of the zip, sorted by name; directory entries are skipped.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: the bytes are not a readable zip archive
    fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        let mut zip = ZipArchive::new(Cursor::new(self.bytes.as_slice()))
            .map_err(|e| self.unreadable(e))?;

        let mut entries = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let mut file = zip.by_index(index).map_err(|e| self.unreadable(e))?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|e| self.unreadable(ZipError::Io(e)))?;
            entries.push(ArchiveEntry::new(name, bytes));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
