pub const INVALID_INPUT: &str = "invalid_input";
pub const UNKNOWN_COMMAND: &str = "unknown_command";
pub const EXPORT_FAILED: &str = "export_failed";
pub const INTERNAL_ERROR: &str = "internal_error";
