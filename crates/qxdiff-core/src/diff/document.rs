//! Parsed descriptor documents.

use crate::errors::{DiffError, Result};
use serde_json::Value;
use sha2::{Digest as _, Sha256};

/// One parsed descriptor, addressed by its archive-relative name.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    file_path: String,
    root: Value,
    digest: String,
}

impl Document {
    /// Parse YAML text into a document tree.
    ///
    /// Mapping keys must be strings; key order is preserved. The tree is a
    /// JSON value, which has no non-finite numbers: `.nan`, `.inf` and
    /// `-.inf` become `null` and are classified as `NULL`.
    ///
    /// # Errors
    ///
    /// - `InvalidDocument`: `text` is not valid YAML or has non-string keys
    pub fn parse_yaml(file_path: impl Into<String>, text: &str) -> Result<Self> {
        let file_path = file_path.into();
        let root: Value = serde_yaml::from_str(text).map_err(|source| DiffError::Yaml {
            file: file_path.clone(),
            source,
        })?;
        Ok(Self {
            digest: sha256_hex(text.as_bytes()),
            file_path,
            root,
        })
    }

    /// Decode UTF-8 bytes and parse them as YAML.
    ///
    /// # Errors
    ///
    /// - `InvalidDocument`: bytes are not UTF-8, or not valid YAML
    pub fn from_bytes(file_path: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let file_path = file_path.into();
        let text = std::str::from_utf8(bytes).map_err(|_| DiffError::NotUtf8 {
            file: file_path.clone(),
        })?;
        Self::parse_yaml(file_path, text)
    }

    /// Wrap an already-parsed tree; the digest covers its JSON rendering
    pub fn from_value(file_path: impl Into<String>, root: Value) -> Self {
        let digest = sha256_hex(root.to_string().as_bytes());
        Self {
            file_path: file_path.into(),
            root,
            digest,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// SHA-256 of the source bytes, hex encoded
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
