//! Analyzer configuration.
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! fail_on = "potentially-breaking"   # none | potentially-breaking | breaking
//! format = "json"                    # human | json
//! logging = "production"             # development | production | test
//! ```

use crate::errors::{io_error, DiffError, Result};
use crate::logging_facility::Profile;
use crate::model::Severity;
use serde::Deserialize;
use std::path::Path;

/// Severity at which an analysis run is considered failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailOn {
    /// Never fail
    None,
    PotentiallyBreaking,
    #[default]
    Breaking,
}

impl FailOn {
    /// Minimum severity that fails the run; `None` disables failing
    pub fn threshold(&self) -> Option<Severity> {
        match self {
            FailOn::None => None,
            FailOn::PotentiallyBreaking => Some(Severity::PotentiallyBreaking),
            FailOn::Breaking => Some(Severity::Breaking),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub fail_on: FailOn,
    pub format: OutputFormat,
    pub logging: Profile,
}

impl AnalyzerConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig`: malformed TOML, unknown keys or values
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| DiffError::Config { source }.into())
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// - `Io`: the file could not be read
    /// - `InvalidConfig`: see [`AnalyzerConfig::from_toml_str`]
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| io_error("load_config", path, e))?;
        Self::from_toml_str(&text).map_err(|e| e.with_path(path.display().to_string()))
    }
}
