//! Descriptor schema rules.
//!
//! A [`RuleTable`] maps anchored path patterns to the value kind the schema
//! requires at that path. Paths matching no rule are not legal properties.

pub mod matcher;
pub mod table;

pub use matcher::PathPattern;
pub use table::{Rule, RuleTable, STATUS_PATH};
