use crate::errors::{DiffError, Result};
use regex::Regex;

/// A regular expression matched against the whole of a pointer path.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile `pattern` anchored at both ends.
    ///
    /// # Errors
    ///
    /// - `InvalidPattern`: `pattern` is not a valid regular expression
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            DiffError::Pattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written, without anchors
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_empty_pattern_matches_only_root() {
        let root = PathPattern::new("").unwrap();
        assert!(root.matches(""));
        assert!(!root.matches("/name"));
    }

    #[test]
    fn test_pattern_is_not_a_prefix_match() {
        let metadata = PathPattern::new("/metadata").unwrap();
        assert!(metadata.matches("/metadata"));
        assert!(!metadata.matches("/metadata/status"));
        assert!(!metadata.matches("/x/metadata"));
    }

    #[test]
    fn test_index_pattern() {
        let keyword = PathPattern::new(r"/metadata/keywords/\d+").unwrap();
        assert!(keyword.matches("/metadata/keywords/0"));
        assert!(keyword.matches("/metadata/keywords/12"));
        assert!(!keyword.matches("/metadata/keywords/"));
        assert!(!keyword.matches("/metadata/keywords/first"));
        assert!(!keyword.matches("/metadata/keywords/0/x"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let either = PathPattern::new("/a|/b").unwrap();
        assert!(either.matches("/a"));
        assert!(either.matches("/b"));
        assert!(!either.matches("/a/b"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = PathPattern::new("/metadata/(").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidPattern);
    }
}
