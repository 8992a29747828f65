//! Quarkus extension descriptor analyzer.
//!
//! [`ExtensionAnalyzer`] ties the pieces together: it locates descriptors in
//! two archives, parses them, and walks each pair of trees with a
//! [`DescriptorClassifier`].

pub mod classifier;
pub mod comparer;

pub use classifier::DescriptorClassifier;
pub use comparer::{GenericComparer, StructuralComparer};

use crate::archive::{Archive, ArchiveEntry, DescriptorLocator};
use crate::diff::{AnalysisReport, DescriptorIdentity, Document, TreeDiffer};
use crate::errors::Result;
use crate::model::Difference;
use crate::rules::RuleTable;
use crate::{log_op_end, log_op_error, log_op_start};
use qxdiff_core_types::RunId;
use std::collections::BTreeMap;
use std::time::Instant;

/// Identifier the analyzer registers under
pub const EXTENSION_ID: &str = "quarkus.extension";

/// Compares the extension descriptors of two archives.
#[derive(Debug, Clone)]
pub struct ExtensionAnalyzer<C = StructuralComparer> {
    classifier: DescriptorClassifier<C>,
    locator: DescriptorLocator,
}

impl ExtensionAnalyzer<StructuralComparer> {
    /// Analyzer with the built-in descriptor schema and structural delegation
    ///
    /// # Errors
    ///
    /// - `InvalidPattern`: never for the built-in rules
    pub fn new() -> Result<Self> {
        Ok(Self::with_classifier(
            DescriptorClassifier::with_rules(RuleTable::quarkus_extension()?),
            DescriptorLocator::quarkus_extension()?,
        ))
    }
}

impl<C: GenericComparer> ExtensionAnalyzer<C> {
    pub fn with_classifier(classifier: DescriptorClassifier<C>, locator: DescriptorLocator) -> Self {
        Self {
            classifier,
            locator,
        }
    }

    pub fn extension_id(&self) -> &'static str {
        EXTENSION_ID
    }

    pub fn classifier(&self) -> &DescriptorClassifier<C> {
        &self.classifier
    }

    pub fn locator(&self) -> &DescriptorLocator {
        &self.locator
    }

    /// Diff two parsed documents; either may be absent, not both.
    ///
    /// # Errors
    ///
    /// Propagates errors from the delegate comparer.
    pub fn diff_documents(
        &self,
        old: Option<&Document>,
        new: Option<&Document>,
    ) -> Result<Vec<Difference>> {
        TreeDiffer::new(&self.classifier).diff(old, new)
    }

    /// Diff two documents and wrap the result in a report
    ///
    /// # Errors
    ///
    /// Propagates errors from the delegate comparer.
    pub fn analyze_documents(&self, old: &Document, new: &Document) -> Result<AnalysisReport> {
        let differences = self.diff_documents(Some(old), Some(new))?;
        let identity = DescriptorIdentity {
            file: old.file_path().to_string(),
            old_digest: Some(old.digest().to_string()),
            new_digest: Some(new.digest().to_string()),
        };
        Ok(AnalysisReport::new(vec![identity], differences))
    }

    /// Compare every descriptor found in either archive.
    ///
    /// Descriptors are paired by entry name. One present on a single side
    /// is compared against an absent document. Archives without any
    /// descriptor produce an empty report.
    ///
    /// # Errors
    ///
    /// - `Io`: an archive could not be read
    /// - `InvalidDocument`: a descriptor is not UTF-8 YAML
    pub fn analyze_archives(&self, old: &dyn Archive, new: &dyn Archive) -> Result<AnalysisReport> {
        let run_id = RunId::new();
        log_op_start!(
            "analyze_archives",
            run_id = run_id.as_str(),
            old = old.name(),
            new = new.name()
        );
        let started = Instant::now();

        let result = self.analyze_located(old, new);
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok((descriptors, differences)) => {
                log_op_end!(
                    "analyze_archives",
                    duration_ms = duration_ms,
                    run_id = run_id.as_str(),
                    descriptor_count = descriptors.len(),
                    diff_count = differences.len()
                );
                Ok(AnalysisReport {
                    run_id,
                    descriptors,
                    differences,
                })
            }
            Err(err) => {
                log_op_error!(
                    "analyze_archives",
                    &err,
                    duration_ms = duration_ms,
                    run_id = run_id.as_str()
                );
                Err(err)
            }
        }
    }

    fn analyze_located(
        &self,
        old: &dyn Archive,
        new: &dyn Archive,
    ) -> Result<(Vec<DescriptorIdentity>, Vec<Difference>)> {
        let mut paired: BTreeMap<String, (Option<Document>, Option<Document>)> = BTreeMap::new();
        for entry in self.locator.locate(old)? {
            let doc = parse_entry(entry)?;
            let key = doc.file_path().to_string();
            paired.entry(key).or_default().0 = Some(doc);
        }
        for entry in self.locator.locate(new)? {
            let doc = parse_entry(entry)?;
            let key = doc.file_path().to_string();
            paired.entry(key).or_default().1 = Some(doc);
        }

        let mut descriptors = Vec::with_capacity(paired.len());
        let mut differences = Vec::new();
        for (file, (old_doc, new_doc)) in paired {
            differences.extend(self.diff_documents(old_doc.as_ref(), new_doc.as_ref())?);
            descriptors.push(DescriptorIdentity {
                file,
                old_digest: old_doc.map(|d| d.digest().to_string()),
                new_digest: new_doc.map(|d| d.digest().to_string()),
            });
        }
        Ok((descriptors, differences))
    }
}

fn parse_entry(entry: ArchiveEntry) -> Result<Document> {
    Document::from_bytes(entry.name, &entry.bytes)
}
