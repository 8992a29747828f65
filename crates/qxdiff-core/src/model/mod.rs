pub mod difference;
pub mod node;

pub use difference::{
    Classification, CompatibilityType, Difference, DifferenceBuilder, DifferenceCode, Severity,
};
pub use node::{DocumentNode, NodePair, ValueKind};
