//! Schema-validating node pair classifier.
//!
//! For every aligned pair the checks run in a fixed order and the first one
//! that fires decides the result:
//!
//! 1. the path must be a legal property (`invalidProperty`)
//! 2. the old value must have the required kind (`invalidOldPropertyType`)
//! 3. the new value must have the required kind (`invalidNewPropertyType`)
//! 4. `/metadata/status` must not change (`statusChanged`)
//! 5. otherwise the delegate comparer decides
//!
//! A pair therefore never yields more than one difference.

use crate::analyzer::comparer::{GenericComparer, StructuralComparer};
use crate::errors::Result;
use crate::model::difference::{
    ATTACHMENT_ACTUAL_TYPE, ATTACHMENT_EXPECTED_TYPE, ATTACHMENT_NEW_VALUE, ATTACHMENT_OLD_VALUE,
};
use crate::model::{Difference, DifferenceCode, DocumentNode, NodePair, ValueKind};
use crate::rules::{RuleTable, STATUS_PATH};

/// Applies the descriptor schema to node pairs, deferring to `C` for
/// everything the schema does not special-case.
#[derive(Debug, Clone)]
pub struct DescriptorClassifier<C = StructuralComparer> {
    rules: RuleTable,
    delegate: C,
}

impl DescriptorClassifier<StructuralComparer> {
    /// Classifier over the given rules with structural delegation
    pub fn with_rules(rules: RuleTable) -> Self {
        Self::new(rules, StructuralComparer)
    }
}

impl<C: GenericComparer> DescriptorClassifier<C> {
    pub fn new(rules: RuleTable, delegate: C) -> Self {
        Self { rules, delegate }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Classify one pair.
    ///
    /// # Errors
    ///
    /// Only errors returned by the delegate comparer, unchanged.
    pub fn classify(&self, pair: &NodePair<'_>) -> Result<Option<Difference>> {
        let file = pair.file_path();
        let path = pair.path();

        let Some(expected) = self.rules.lookup(path) else {
            return Ok(Some(
                Difference::builder(DifferenceCode::InvalidProperty, file, path).build(),
            ));
        };

        if let Some(found) = mismatched_kind(pair.old(), expected) {
            return Ok(Some(kind_mismatch(
                DifferenceCode::InvalidOldPropertyType,
                file,
                path,
                expected,
                found,
            )));
        }

        if let Some(found) = mismatched_kind(pair.new_node(), expected) {
            return Ok(Some(kind_mismatch(
                DifferenceCode::InvalidNewPropertyType,
                file,
                path,
                expected,
                found,
            )));
        }

        if path == STATUS_PATH {
            let old_value = pair
                .old()
                .and_then(DocumentNode::scalar_value)
                .unwrap_or_default();
            let new_value = pair
                .new_node()
                .and_then(DocumentNode::scalar_value)
                .unwrap_or_default();

            if old_value != new_value {
                return Ok(Some(
                    Difference::builder(DifferenceCode::StatusChanged, file, STATUS_PATH)
                        .attach(ATTACHMENT_OLD_VALUE, old_value)
                        .attach(ATTACHMENT_NEW_VALUE, new_value)
                        .build(),
                ));
            }
        }

        self.delegate.compare(pair)
    }
}

impl<C: GenericComparer> GenericComparer for DescriptorClassifier<C> {
    fn compare(&self, pair: &NodePair<'_>) -> Result<Option<Difference>> {
        self.classify(pair)
    }
}

/// Kind of `node` when it is backed by a value of the wrong kind
fn mismatched_kind(node: Option<&DocumentNode<'_>>, expected: ValueKind) -> Option<ValueKind> {
    let found = node?.value_kind();
    (found.is_determinable() && found != expected).then_some(found)
}

fn kind_mismatch(
    code: DifferenceCode,
    file: &str,
    path: &str,
    expected: ValueKind,
    found: ValueKind,
) -> Difference {
    Difference::builder(code, file, path)
        .attach(ATTACHMENT_EXPECTED_TYPE, expected.name())
        .attach(ATTACHMENT_ACTUAL_TYPE, found.name())
        .build()
}
