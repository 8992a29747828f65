//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Descriptor identifiers
pub const FIELD_FILE: &str = "file";
pub const FIELD_PATH: &str = "path";
pub const FIELD_CODE: &str = "code";

// Collection sizes
pub const FIELD_DIFF_COUNT: &str = "diff_count";
pub const FIELD_DESCRIPTOR_COUNT: &str = "descriptor_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
