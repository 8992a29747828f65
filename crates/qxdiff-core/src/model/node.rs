//! Document nodes as seen by the classifier.
//!
//! A [`DocumentNode`] is one position in a parsed descriptor tree. It borrows
//! the parsed value from its [`Document`](crate::diff::Document) and is only
//! alive for the duration of one classifier call.

use serde_json::Value;

/// Structural type of a node.
///
/// `Missing` marks a synthetic placeholder that is backed by no parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    Missing,
}

impl ValueKind {
    /// Kind of a parsed value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
        }
    }

    /// Canonical upper-case name, used in `expectedType` / `actualType` attachments
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Object => "OBJECT",
            ValueKind::Array => "ARRAY",
            ValueKind::String => "STRING",
            ValueKind::Number => "NUMBER",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Null => "NULL",
            ValueKind::Missing => "MISSING",
        }
    }

    /// True when the kind comes from a concrete parsed value
    pub fn is_determinable(&self) -> bool {
        !matches!(self, ValueKind::Missing)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One position in a parsed descriptor tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentNode<'a> {
    file_path: &'a str,
    path: String,
    value: Option<&'a Value>,
}

impl<'a> DocumentNode<'a> {
    /// Node backed by a parsed value
    pub fn new(file_path: &'a str, path: impl Into<String>, value: &'a Value) -> Self {
        Self {
            file_path,
            path: path.into(),
            value: Some(value),
        }
    }

    /// Synthetic placeholder with kind [`ValueKind::Missing`]
    pub fn missing(file_path: &'a str, path: impl Into<String>) -> Self {
        Self {
            file_path,
            path: path.into(),
            value: None,
        }
    }

    /// Identifier of the source document (archive-relative name)
    pub fn file_path(&self) -> &'a str {
        self.file_path
    }

    /// JSON-pointer location; the root is the empty string
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value.map_or(ValueKind::Missing, ValueKind::of)
    }

    /// Display string of a scalar value; `None` for containers and placeholders
    pub fn scalar_value(&self) -> Option<String> {
        match self.value? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some("null".to_string()),
            Value::Object(_) | Value::Array(_) => None,
        }
    }
}

/// An aligned (old, new) pair at one path.
///
/// At least one side is always present.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePair<'a> {
    /// Present only in the old document
    Old(DocumentNode<'a>),
    /// Present only in the new document
    New(DocumentNode<'a>),
    Both(DocumentNode<'a>, DocumentNode<'a>),
}

impl<'a> NodePair<'a> {
    /// Build a pair from optional sides; `None` when both are absent
    pub fn from_options(
        old: Option<DocumentNode<'a>>,
        new: Option<DocumentNode<'a>>,
    ) -> Option<Self> {
        match (old, new) {
            (Some(old), Some(new)) => Some(NodePair::Both(old, new)),
            (Some(old), None) => Some(NodePair::Old(old)),
            (None, Some(new)) => Some(NodePair::New(new)),
            (None, None) => None,
        }
    }

    pub fn old(&self) -> Option<&DocumentNode<'a>> {
        match self {
            NodePair::Old(old) | NodePair::Both(old, _) => Some(old),
            NodePair::New(_) => None,
        }
    }

    pub fn new_node(&self) -> Option<&DocumentNode<'a>> {
        match self {
            NodePair::New(new) | NodePair::Both(_, new) => Some(new),
            NodePair::Old(_) => None,
        }
    }

    /// The old node when present, otherwise the new one
    pub fn representative(&self) -> &DocumentNode<'a> {
        match self {
            NodePair::Old(node) | NodePair::New(node) | NodePair::Both(node, _) => node,
        }
    }

    pub fn file_path(&self) -> &'a str {
        self.representative().file_path()
    }

    pub fn path(&self) -> &str {
        self.representative().path()
    }
}
