//! Analysis report types.
//!
//! A report collects every difference found across the descriptors of one
//! analysis run, together with digests identifying the compared inputs.

use crate::errors::{serialization_error, Result};
use crate::model::{Difference, DifferenceCode, Severity};
use qxdiff_core_types::RunId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Digests of one descriptor on both sides of the comparison.
///
/// A side is `None` when the descriptor exists only in the other archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorIdentity {
    /// Archive-relative descriptor name
    pub file: String,
    pub old_digest: Option<String>,
    pub new_digest: Option<String>,
}

impl DescriptorIdentity {
    /// True when both sides exist and hash to the same bytes
    pub fn is_identical(&self) -> bool {
        self.old_digest.is_some() && self.old_digest == self.new_digest
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: RunId,
    /// Compared descriptors, sorted by name
    pub descriptors: Vec<DescriptorIdentity>,
    /// Differences in emission order, grouped by descriptor
    pub differences: Vec<Difference>,
}

impl AnalysisReport {
    pub fn new(descriptors: Vec<DescriptorIdentity>, differences: Vec<Difference>) -> Self {
        Self {
            run_id: RunId::new(),
            descriptors,
            differences,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Highest severity among the differences, `None` for an empty report
    pub fn max_severity(&self) -> Option<Severity> {
        self.differences.iter().map(Difference::severity).max()
    }

    /// True when at least one difference is at or above `threshold`
    pub fn exceeds(&self, threshold: Severity) -> bool {
        self.max_severity().is_some_and(|max| max >= threshold)
    }

    /// Number of differences per code; absent codes are omitted
    pub fn count_by_code(&self) -> BTreeMap<DifferenceCode, usize> {
        let mut counts = BTreeMap::new();
        for difference in &self.differences {
            *counts.entry(difference.code).or_insert(0) += 1;
        }
        counts
    }

    /// Differences reported against one descriptor
    pub fn differences_for<'r>(&'r self, file: &'r str) -> impl Iterator<Item = &'r Difference> {
        self.differences.iter().filter(move |d| d.file() == file)
    }

    /// Pretty-printed JSON rendering of the whole report.
    ///
    /// # Errors
    ///
    /// - `Serialization`: never for well-formed reports
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| serialization_error("render_report", e))
    }
}
