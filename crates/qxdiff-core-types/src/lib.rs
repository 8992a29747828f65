//! Core types shared across qxdiff facilities
//!
//! This crate provides foundational types used by the analyzer, its
//! logging facility and the CLI host:
//!
//! - **Correlation types**: RunId for tagging one analysis run
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
