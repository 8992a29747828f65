//! Archives that may carry extension descriptors.
//!
//! An archive is a flat list of named entries. Entry names are
//! archive-relative and `/`-separated regardless of platform, so they can
//! be matched by [`DescriptorLocator`] and used as difference file paths.

pub mod jar;
pub mod locator;

pub use jar::{is_zip, JarArchive};
pub use locator::{DescriptorLocator, DESCRIPTOR_PATTERN};

use crate::errors::{io_error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One named entry of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Source of archive entries
pub trait Archive {
    /// Display name used in logs
    fn name(&self) -> &str;

    /// All entries, sorted by name.
    ///
    /// # Errors
    ///
    /// - `Io`: the backing storage could not be read
    fn entries(&self) -> Result<Vec<ArchiveEntry>>;
}

/// Archive held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    name: String,
    entries: Vec<ArchiveEntry>,
}

impl MemoryArchive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Add or replace an entry
    pub fn with_entry(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let entry = ArchiveEntry::new(name, bytes);
        self.entries.retain(|e| e.name != entry.name);
        self.entries.push(entry);
        self
    }
}

impl Archive for MemoryArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Exploded archive rooted at a directory
pub struct DirectoryArchive {
    root: PathBuf,
    name: String,
}

impl DirectoryArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.display().to_string();
        Self { root, name }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Archive for DirectoryArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        let mut files = Vec::new();
        collect_files(&self.root, &mut files)?;

        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let bytes = fs::read(&path).map_err(|e| io_error("read_entry", &path, e))?;
            entries.push(ArchiveEntry::new(entry_name(&self.root, &path), bytes));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let read_dir = fs::read_dir(dir).map_err(|e| io_error("list_archive", dir, e))?;
    for entry in read_dir {
        let entry = entry.map_err(|e| io_error("list_archive", dir, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| io_error("list_archive", &path, e))?;
        if file_type.is_dir() {
            collect_files(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// `/`-joined components of `path` below `root`
fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_archive_sorts_and_replaces() {
        let archive = MemoryArchive::new("mem")
            .with_entry("b.txt", "1")
            .with_entry("a.txt", "2")
            .with_entry("b.txt", "3");
        let entries = archive.entries().unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(entries[1].bytes, b"3");
    }

    #[test]
    fn test_entry_name_uses_forward_slashes() {
        let root = Path::new("root");
        let path = root.join("META-INF").join("quarkus-extension.yaml");
        assert_eq!(entry_name(root, &path), "META-INF/quarkus-extension.yaml");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let archive = DirectoryArchive::new("/nonexistent/qxdiff/archive");
        let err = archive.entries().unwrap_err();
        assert_eq!(err.kind(), crate::errors::ExErrorKind::Io);
        assert_eq!(err.op(), Some("list_archive"));
    }
}
