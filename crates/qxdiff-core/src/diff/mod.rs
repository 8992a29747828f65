//! Descriptor tree diff.
//!
//! Parses descriptor documents and walks two trees side by side, handing
//! every aligned node pair to a [`GenericComparer`](crate::analyzer::GenericComparer).
//!
//! ## Entry point
//!
//! ```
//! use qxdiff_core::analyzer::DescriptorClassifier;
//! use qxdiff_core::diff::{Document, TreeDiffer};
//! use qxdiff_core::rules::RuleTable;
//!
//! let old = Document::parse_yaml("quarkus-extension.yaml", "name: a\n").unwrap();
//! let new = Document::parse_yaml("quarkus-extension.yaml", "name: b\n").unwrap();
//! let classifier = DescriptorClassifier::with_rules(RuleTable::quarkus_extension().unwrap());
//! let diffs = TreeDiffer::new(&classifier).diff(Some(&old), Some(&new)).unwrap();
//! assert_eq!(diffs.len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs yield identical difference lists, in
//!   depth-first old-document order.
//! - **Idempotence**: a document compared with itself yields no differences
//!   from the structural comparer.
//! - **Index alignment**: array elements are aligned by longest common
//!   subsequence so an insertion does not cascade into per-index changes.

pub mod align;
pub mod document;
pub mod engine;
pub mod human_summary;
pub mod report;

pub use document::Document;
pub use engine::TreeDiffer;
pub use human_summary::render_human_summary;
pub use report::{AnalysisReport, DescriptorIdentity};
