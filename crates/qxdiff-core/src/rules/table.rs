use crate::errors::Result;
use crate::model::ValueKind;
use crate::rules::matcher::PathPattern;

/// Path of the tracked extension status scalar
pub const STATUS_PATH: &str = "/metadata/status";

/// Legal properties of the Quarkus extension descriptor.
const DESCRIPTOR_RULES: &[(&str, ValueKind)] = &[
    ("", ValueKind::Object),
    ("/name", ValueKind::String),
    ("/metadata", ValueKind::Object),
    ("/metadata/keywords", ValueKind::Array),
    (r"/metadata/keywords/\d+", ValueKind::String),
    ("/metadata/guide", ValueKind::String),
    ("/metadata/categories", ValueKind::Array),
    (r"/metadata/categories/\d+", ValueKind::String),
    (STATUS_PATH, ValueKind::String),
];

#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: PathPattern,
    pub kind: ValueKind,
}

/// Ordered (pattern, required kind) rules; first match wins.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table from `(pattern, kind)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// - `InvalidPattern`: any pattern fails to compile
    pub fn new<'p>(rules: impl IntoIterator<Item = (&'p str, ValueKind)>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|(pattern, kind)| {
                Ok(Rule {
                    pattern: PathPattern::new(pattern)?,
                    kind,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// The fixed Quarkus extension descriptor schema.
    ///
    /// # Errors
    ///
    /// - `InvalidPattern`: never for the built-in table
    pub fn quarkus_extension() -> Result<Self> {
        Self::new(DESCRIPTOR_RULES.iter().copied())
    }

    /// Required kind at `path`, or `None` when the path is not a legal property
    pub fn lookup(&self, path: &str) -> Option<ValueKind> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map(|rule| rule.kind)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_lookups() {
        let table = RuleTable::quarkus_extension().unwrap();
        let cases = [
            ("", Some(ValueKind::Object)),
            ("/name", Some(ValueKind::String)),
            ("/metadata", Some(ValueKind::Object)),
            ("/metadata/keywords", Some(ValueKind::Array)),
            ("/metadata/keywords/3", Some(ValueKind::String)),
            ("/metadata/guide", Some(ValueKind::String)),
            ("/metadata/categories", Some(ValueKind::Array)),
            ("/metadata/categories/0", Some(ValueKind::String)),
            ("/metadata/status", Some(ValueKind::String)),
            ("/metadata/kachny", None),
            ("/version", None),
            ("/metadata/keywords/0/nested", None),
            ("/name/0", None),
        ];
        for (path, expected) in cases {
            assert_eq!(table.lookup(path), expected, "lookup({:?})", path);
        }
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn test_first_match_wins() {
        let table = RuleTable::new([
            ("/a/.*", ValueKind::Number),
            ("/a/b", ValueKind::String),
        ])
        .unwrap();
        assert_eq!(table.lookup("/a/b"), Some(ValueKind::Number));
    }

    #[test]
    fn test_empty_table_knows_nothing() {
        let table = RuleTable::new(std::iter::empty()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.lookup(""), None);
    }
}
