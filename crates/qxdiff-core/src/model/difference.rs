//! Difference records produced by the analyzer.
//!
//! Codes are a wire contract: external tooling matches on the serialized
//! strings, and deduplication keys on the identifying attachments, which
//! are always exactly `file` and `path`.

use qxdiff_core_types::schema::{FIELD_FILE, FIELD_PATH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ATTACHMENT_EXPECTED_TYPE: &str = "expectedType";
pub const ATTACHMENT_ACTUAL_TYPE: &str = "actualType";
pub const ATTACHMENT_OLD_VALUE: &str = "oldValue";
pub const ATTACHMENT_NEW_VALUE: &str = "newValue";

/// Stable difference codes emitted for Quarkus extension descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifferenceCode {
    #[serde(rename = "quarkus-extension.invalidProperty")]
    InvalidProperty,
    #[serde(rename = "quarkus-extension.invalidOldPropertyType")]
    InvalidOldPropertyType,
    #[serde(rename = "quarkus-extension.invalidNewPropertyType")]
    InvalidNewPropertyType,
    #[serde(rename = "quarkus-extension.statusChanged")]
    StatusChanged,
    #[serde(rename = "quarkus-extension.propertyAdded")]
    PropertyAdded,
    #[serde(rename = "quarkus-extension.propertyRemoved")]
    PropertyRemoved,
    #[serde(rename = "quarkus-extension.propertyChanged")]
    PropertyChanged,
}

impl DifferenceCode {
    pub const ALL: [DifferenceCode; 7] = [
        DifferenceCode::InvalidProperty,
        DifferenceCode::InvalidOldPropertyType,
        DifferenceCode::InvalidNewPropertyType,
        DifferenceCode::StatusChanged,
        DifferenceCode::PropertyAdded,
        DifferenceCode::PropertyRemoved,
        DifferenceCode::PropertyChanged,
    ];

    /// Wire string of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceCode::InvalidProperty => "quarkus-extension.invalidProperty",
            DifferenceCode::InvalidOldPropertyType => "quarkus-extension.invalidOldPropertyType",
            DifferenceCode::InvalidNewPropertyType => "quarkus-extension.invalidNewPropertyType",
            DifferenceCode::StatusChanged => "quarkus-extension.statusChanged",
            DifferenceCode::PropertyAdded => "quarkus-extension.propertyAdded",
            DifferenceCode::PropertyRemoved => "quarkus-extension.propertyRemoved",
            DifferenceCode::PropertyChanged => "quarkus-extension.propertyChanged",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DifferenceCode::InvalidProperty => "Invalid Property",
            DifferenceCode::InvalidOldPropertyType => "Old Property Type Invalid",
            DifferenceCode::InvalidNewPropertyType => "New Property Type Invalid",
            DifferenceCode::StatusChanged => "Status Changed",
            DifferenceCode::PropertyAdded => "Property Added",
            DifferenceCode::PropertyRemoved => "Property Removed",
            DifferenceCode::PropertyChanged => "Property Changed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DifferenceCode::InvalidProperty => {
                "The property is not valid in Quarkus extension descriptor."
            }
            DifferenceCode::InvalidOldPropertyType => {
                "The property in the old API does not have the expected type."
            }
            DifferenceCode::InvalidNewPropertyType => {
                "The property in the new API does not have the expected type."
            }
            DifferenceCode::StatusChanged => "The extension status changed.",
            DifferenceCode::PropertyAdded => "The property was added.",
            DifferenceCode::PropertyRemoved => "The property was removed.",
            DifferenceCode::PropertyChanged => "The value of the property changed.",
        }
    }

    /// Severity the code is reported with unless a comparer overrides it
    pub fn default_severity(&self) -> Severity {
        match self {
            DifferenceCode::InvalidProperty
            | DifferenceCode::InvalidOldPropertyType
            | DifferenceCode::InvalidNewPropertyType => Severity::Breaking,
            DifferenceCode::StatusChanged
            | DifferenceCode::PropertyRemoved
            | DifferenceCode::PropertyChanged => Severity::PotentiallyBreaking,
            DifferenceCode::PropertyAdded => Severity::None,
        }
    }
}

impl std::fmt::Display for DifferenceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How severe a difference is for consumers of the descriptor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    None,
    PotentiallyBreaking,
    Breaking,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::PotentiallyBreaking => "POTENTIALLY_BREAKING",
            Severity::Breaking => "BREAKING",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of compatibility a difference affects.
///
/// Descriptor changes never affect binary or source compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityType {
    Semantic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub compatibility_type: CompatibilityType,
    pub severity: Severity,
}

/// A single reported deviation between the old and new descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    pub code: DifferenceCode,
    pub name: String,
    pub description: String,
    pub classification: Classification,
    /// Always contains `file` and `path`
    pub attachments: BTreeMap<String, String>,
    /// Attachment keys identifying this difference across runs
    pub identifying_attachments: Vec<String>,
}

impl Difference {
    /// Start a difference at the given file and path
    pub fn builder(
        code: DifferenceCode,
        file: impl Into<String>,
        path: impl Into<String>,
    ) -> DifferenceBuilder {
        let mut attachments = BTreeMap::new();
        attachments.insert(FIELD_FILE.to_string(), file.into());
        attachments.insert(FIELD_PATH.to_string(), path.into());
        DifferenceBuilder {
            code,
            severity: code.default_severity(),
            attachments,
        }
    }

    pub fn severity(&self) -> Severity {
        self.classification.severity
    }

    pub fn attachment(&self, key: &str) -> Option<&str> {
        self.attachments.get(key).map(String::as_str)
    }

    pub fn file(&self) -> &str {
        self.attachment(FIELD_FILE).unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.attachment(FIELD_PATH).unwrap_or_default()
    }
}

pub struct DifferenceBuilder {
    code: DifferenceCode,
    severity: Severity,
    attachments: BTreeMap<String, String>,
}

impl DifferenceBuilder {
    /// Add an attachment; `file` and `path` are fixed by the builder
    pub fn attach(mut self, key: &str, value: impl Into<String>) -> Self {
        if key != FIELD_FILE && key != FIELD_PATH {
            self.attachments.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn build(self) -> Difference {
        Difference {
            code: self.code,
            name: self.code.name().to_string(),
            description: self.code.description().to_string(),
            classification: Classification {
                compatibility_type: CompatibilityType::Semantic,
                severity: self.severity,
            },
            attachments: self.attachments,
            identifying_attachments: vec![FIELD_FILE.to_string(), FIELD_PATH.to_string()],
        }
    }
}
