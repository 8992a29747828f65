pub mod diff;

/// No difference reached the failure threshold
pub const EXIT_OK: i32 = 0;
/// The command could not complete
pub const EXIT_ERROR: i32 = 1;
/// At least one difference reached the failure threshold
pub const EXIT_THRESHOLD: i32 = 2;
