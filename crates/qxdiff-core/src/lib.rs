//! qxdiff Core - Schema-validating descriptor difference analysis
//!
//! This crate compares two versions of a Quarkus extension descriptor
//! (`META-INF/quarkus-extension.yaml`) and reports semantically meaningful
//! differences, including:
//! - Properties the descriptor schema does not allow
//! - Properties holding a value of the wrong kind on either side
//! - Changes to the extension status
//! - Generic added/removed/changed properties for everything else
//!
//! The decision logic lives in [`analyzer`]; [`diff`] walks the two
//! document trees and [`archive`] finds descriptors inside artifacts.

pub mod analyzer;
pub mod archive;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

#[doc(hidden)]
pub use qxdiff_core_types as core_types;

// Re-export commonly used types
pub use analyzer::{DescriptorClassifier, ExtensionAnalyzer, GenericComparer, StructuralComparer};
pub use config::AnalyzerConfig;
pub use diff::{AnalysisReport, Document, TreeDiffer};
pub use errors::{DiffError, ExError, ExErrorKind, Result};
pub use model::{Difference, DifferenceCode, DocumentNode, NodePair, Severity, ValueKind};
pub use rules::RuleTable;
