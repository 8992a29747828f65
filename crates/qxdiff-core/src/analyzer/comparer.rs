//! Generic structural comparison.

use crate::errors::Result;
use crate::model::difference::{ATTACHMENT_NEW_VALUE, ATTACHMENT_OLD_VALUE};
use crate::model::{Difference, DifferenceCode, DocumentNode, NodePair};

/// Compares one aligned node pair.
///
/// Implementations are pure: the tree differ may call them in any order and
/// from any thread.
pub trait GenericComparer: Send + Sync {
    /// Compare one pair, producing at most one difference.
    ///
    /// # Errors
    ///
    /// Implementation-specific; the built-in comparers never fail.
    fn compare(&self, pair: &NodePair<'_>) -> Result<Option<Difference>>;
}

/// Reports added, removed, and changed properties.
///
/// Containers present on both sides produce nothing; their children are
/// compared as separate pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralComparer;

impl StructuralComparer {
    fn one_sided(code: DifferenceCode, node: &DocumentNode<'_>) -> Difference {
        Difference::builder(code, node.file_path(), node.path()).build()
    }

    fn display(node: &DocumentNode<'_>) -> String {
        node.scalar_value()
            .unwrap_or_else(|| node.value_kind().name().to_string())
    }
}

impl GenericComparer for StructuralComparer {
    fn compare(&self, pair: &NodePair<'_>) -> Result<Option<Difference>> {
        let (old, new) = match pair {
            NodePair::Old(old) => return Ok(Some(Self::one_sided(DifferenceCode::PropertyRemoved, old))),
            NodePair::New(new) => return Ok(Some(Self::one_sided(DifferenceCode::PropertyAdded, new))),
            NodePair::Both(old, new) => (old, new),
        };

        let old_kind = old.value_kind();
        let new_kind = new.value_kind();
        match (old_kind.is_determinable(), new_kind.is_determinable()) {
            (false, false) => return Ok(None),
            (true, false) => return Ok(Some(Self::one_sided(DifferenceCode::PropertyRemoved, old))),
            (false, true) => return Ok(Some(Self::one_sided(DifferenceCode::PropertyAdded, new))),
            (true, true) => {}
        }

        if old_kind.is_container() && new_kind.is_container() {
            return Ok(None);
        }
        if old_kind == new_kind && old.value() == new.value() {
            return Ok(None);
        }

        Ok(Some(
            Difference::builder(DifferenceCode::PropertyChanged, old.file_path(), old.path())
                .attach(ATTACHMENT_OLD_VALUE, Self::display(old))
                .attach(ATTACHMENT_NEW_VALUE, Self::display(new))
                .build(),
        ))
    }
}
