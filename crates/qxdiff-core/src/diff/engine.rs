//! Depth-first walk over two descriptor trees.
//!
//! The core entry point is [`TreeDiffer::diff`], which pairs up every path
//! present in either document and passes each pair to a comparer.

use crate::analyzer::GenericComparer;
use crate::diff::align::{align, Step};
use crate::diff::document::Document;
use crate::errors::Result;
use crate::model::{Difference, DocumentNode, NodePair};
use crate::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use std::time::Instant;

/// Drives a comparer over two document trees.
pub struct TreeDiffer<'c> {
    comparer: &'c dyn GenericComparer,
}

impl<'c> TreeDiffer<'c> {
    pub fn new(comparer: &'c dyn GenericComparer) -> Self {
        Self { comparer }
    }

    /// Compare two documents; either side may be absent but not both.
    ///
    /// Pairs are visited depth-first in old-document order, followed by
    /// paths that exist only in the new document at each level.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the comparer.
    pub fn diff(&self, old: Option<&Document>, new: Option<&Document>) -> Result<Vec<Difference>> {
        let file = old.or(new).map(Document::file_path).unwrap_or_default();
        log_op_start!("diff_documents", file = file);
        let started = Instant::now();

        let old_root = old.map(|doc| DocumentNode::new(doc.file_path(), "", doc.root()));
        let new_root = new.map(|doc| DocumentNode::new(doc.file_path(), "", doc.root()));

        let mut out = Vec::new();
        let result = self.visit(old_root, new_root, &mut out);
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(()) => {
                log_op_end!(
                    "diff_documents",
                    duration_ms = duration_ms,
                    file = file,
                    diff_count = out.len()
                );
                Ok(out)
            }
            Err(err) => {
                log_op_error!("diff_documents", &err, duration_ms = duration_ms, file = file);
                Err(err)
            }
        }
    }

    fn visit<'a>(
        &self,
        old: Option<DocumentNode<'a>>,
        new: Option<DocumentNode<'a>>,
        out: &mut Vec<Difference>,
    ) -> Result<()> {
        let Some(pair) = NodePair::from_options(old, new) else {
            return Ok(());
        };

        if let Some(difference) = self.comparer.compare(&pair)? {
            tracing::debug!(
                code = difference.code.as_str(),
                file = difference.file(),
                path = difference.path(),
                severity = difference.severity().as_str(),
                "difference"
            );
            out.push(difference);
        }

        match pair {
            NodePair::Both(old, new) => self.visit_children(&old, &new, out),
            NodePair::Old(old) => children(&old)
                .into_iter()
                .try_for_each(|child| self.visit(Some(child), None, out)),
            NodePair::New(new) => children(&new)
                .into_iter()
                .try_for_each(|child| self.visit(None, Some(child), out)),
        }
    }

    fn visit_children<'a>(
        &self,
        old: &DocumentNode<'a>,
        new: &DocumentNode<'a>,
        out: &mut Vec<Difference>,
    ) -> Result<()> {
        match (old.value(), new.value()) {
            (Some(Value::Object(old_map)), Some(Value::Object(new_map))) => {
                for (key, old_value) in old_map {
                    let new_child = new_map.get(key).map(|v| child_node(new, key, v));
                    self.visit(Some(child_node(old, key, old_value)), new_child, out)?;
                }
                for (key, new_value) in new_map {
                    if !old_map.contains_key(key) {
                        self.visit(None, Some(child_node(new, key, new_value)), out)?;
                    }
                }
                Ok(())
            }
            (Some(Value::Array(old_items)), Some(Value::Array(new_items))) => {
                for step in align(old_items, new_items) {
                    match step {
                        Step::Both(i, j) => self.visit(
                            Some(element_node(old, i, &old_items[i])),
                            Some(element_node(new, j, &new_items[j])),
                            out,
                        )?,
                        Step::Old(i) => {
                            self.visit(Some(element_node(old, i, &old_items[i])), None, out)?
                        }
                        Step::New(j) => {
                            self.visit(None, Some(element_node(new, j, &new_items[j])), out)?
                        }
                    }
                }
                Ok(())
            }
            _ => {
                for child in children(old) {
                    self.visit(Some(child), None, out)?;
                }
                for child in children(new) {
                    self.visit(None, Some(child), out)?;
                }
                Ok(())
            }
        }
    }
}

/// Direct children of a container node, in document order
fn children<'a>(node: &DocumentNode<'a>) -> Vec<DocumentNode<'a>> {
    match node.value() {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| child_node(node, key, value))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, value)| element_node(node, index, value))
            .collect(),
        _ => Vec::new(),
    }
}

fn child_node<'a>(parent: &DocumentNode<'a>, key: &str, value: &'a Value) -> DocumentNode<'a> {
    DocumentNode::new(
        parent.file_path(),
        format!("{}/{}", parent.path(), escape_pointer_token(key)),
        value,
    )
}

fn element_node<'a>(parent: &DocumentNode<'a>, index: usize, value: &'a Value) -> DocumentNode<'a> {
    DocumentNode::new(
        parent.file_path(),
        format!("{}/{}", parent.path(), index),
        value,
    )
}

/// RFC 6901 escaping of one reference token
fn escape_pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::StructuralComparer;
    use crate::model::DifferenceCode;
    use serde_json::json;

    /// Records every visited pair as "<old path>|<new path>"
    struct Recorder(std::sync::Mutex<Vec<String>>);

    impl GenericComparer for Recorder {
        fn compare(&self, pair: &NodePair<'_>) -> Result<Option<Difference>> {
            let old = pair.old().map(|n| n.path().to_string()).unwrap_or("-".into());
            let new = pair
                .new_node()
                .map(|n| n.path().to_string())
                .unwrap_or("-".into());
            self.0.lock().unwrap().push(format!("{}|{}", old, new));
            Ok(None)
        }
    }

    fn visited(old: Value, new: Value) -> Vec<String> {
        let recorder = Recorder(std::sync::Mutex::new(Vec::new()));
        let old = Document::from_value("f", old);
        let new = Document::from_value("f", new);
        TreeDiffer::new(&recorder)
            .diff(Some(&old), Some(&new))
            .unwrap();
        recorder.0.into_inner().unwrap()
    }

    #[test]
    fn test_walk_order_is_old_first_then_new_only() {
        let pairs = visited(
            json!({"b": 1, "a": {"x": 1}}),
            json!({"c": 2, "a": {"x": 1, "y": 2}}),
        );
        assert_eq!(
            pairs,
            vec!["|", "/b|-", "/a|/a", "/a/x|/a/x", "-|/a/y", "-|/c"]
        );
    }

    #[test]
    fn test_one_sided_subtree_is_walked_fully() {
        let pairs = visited(json!({}), json!({"metadata": {"keywords": ["a", "b"]}}));
        assert_eq!(
            pairs,
            vec![
                "|",
                "-|/metadata",
                "-|/metadata/keywords",
                "-|/metadata/keywords/0",
                "-|/metadata/keywords/1"
            ]
        );
    }

    #[test]
    fn test_container_kind_change_walks_both_sides_one_sided() {
        let pairs = visited(json!({"k": ["a"]}), json!({"k": {"z": 1}}));
        assert_eq!(pairs, vec!["|", "/k|/k", "/k/0|-", "-|/k/z"]);
    }

    #[test]
    fn test_array_pairs_follow_alignment() {
        let pairs = visited(json!(["b", "c"]), json!(["a", "b", "c"]));
        assert_eq!(pairs, vec!["|", "-|/0", "/0|/1", "/1|/2"]);
    }

    #[test]
    fn test_keys_are_pointer_escaped() {
        let pairs = visited(json!({"a/b": 1, "m~n": 2}), json!({"a/b": 1, "m~n": 2}));
        assert_eq!(pairs, vec!["|", "/a~1b|/a~1b", "/m~0n|/m~0n"]);
    }

    #[test]
    fn test_absent_old_document_makes_everything_added() {
        let new = Document::from_value("f", json!({"name": "x"}));
        let diffs = TreeDiffer::new(&StructuralComparer)
            .diff(None, Some(&new))
            .unwrap();
        let codes: Vec<_> = diffs.iter().map(|d| (d.code, d.path().to_string())).collect();
        assert_eq!(
            codes,
            vec![
                (DifferenceCode::PropertyAdded, "".to_string()),
                (DifferenceCode::PropertyAdded, "/name".to_string())
            ]
        );
    }

    #[test]
    fn test_self_comparison_is_empty() {
        let doc = Document::from_value("f", json!({"name": "x", "list": [1, 2, {"a": null}]}));
        let diffs = TreeDiffer::new(&StructuralComparer)
            .diff(Some(&doc), Some(&doc))
            .unwrap();
        assert!(diffs.is_empty());
    }
}
