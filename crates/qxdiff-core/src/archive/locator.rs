//! Descriptor lookup inside archives.

use crate::archive::{Archive, ArchiveEntry};
use crate::errors::Result;
use crate::rules::PathPattern;

/// Entry names recognised as Quarkus extension descriptors
pub const DESCRIPTOR_PATTERN: &str = r"META-INF/quarkus-extension\.ya?ml";

/// Finds descriptor entries by whole-name pattern match.
#[derive(Debug, Clone)]
pub struct DescriptorLocator {
    pattern: PathPattern,
}

impl DescriptorLocator {
    /// Locator for the standard descriptor names
    ///
    /// # Errors
    ///
    /// - `InvalidPattern`: never for the built-in pattern
    pub fn quarkus_extension() -> Result<Self> {
        Self::new(DESCRIPTOR_PATTERN)
    }

    /// # Errors
    ///
    /// - `InvalidPattern`: `pattern` is not a valid regular expression
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: PathPattern::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_descriptor(&self, entry_name: &str) -> bool {
        self.pattern.matches(entry_name)
    }

    /// Descriptor entries of `archive`, sorted by name.
    ///
    /// # Errors
    ///
    /// Propagates archive read failures.
    pub fn locate(&self, archive: &dyn Archive) -> Result<Vec<ArchiveEntry>> {
        let mut found: Vec<_> = archive
            .entries()?
            .into_iter()
            .filter(|entry| self.is_descriptor(&entry.name))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;

    #[test]
    fn test_both_extensions_match_whole_name() {
        let locator = DescriptorLocator::quarkus_extension().unwrap();
        assert!(locator.is_descriptor("META-INF/quarkus-extension.yaml"));
        assert!(locator.is_descriptor("META-INF/quarkus-extension.yml"));
        assert!(!locator.is_descriptor("META-INF/quarkus-extension.json"));
        assert!(!locator.is_descriptor("x/META-INF/quarkus-extension.yaml"));
        assert!(!locator.is_descriptor("META-INF/quarkus-extension.yaml.bak"));
    }

    #[test]
    fn test_locate_filters_entries() {
        let archive = MemoryArchive::new("jar")
            .with_entry("META-INF/quarkus-extension.yml", "name: b")
            .with_entry("META-INF/MANIFEST.MF", "Manifest-Version: 1.0")
            .with_entry("META-INF/quarkus-extension.yaml", "name: a");
        let locator = DescriptorLocator::quarkus_extension().unwrap();
        let names: Vec<_> = locator
            .locate(&archive)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "META-INF/quarkus-extension.yaml",
                "META-INF/quarkus-extension.yml"
            ]
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = DescriptorLocator::new("META-INF/(").unwrap_err();
        assert_eq!(err.kind(), crate::errors::ExErrorKind::InvalidPattern);
    }
}
