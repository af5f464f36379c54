//! Event names shared by the logging macros and their tests

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_FAILURE: &str = "failure";
pub const EVENT_CONFIG_CHANGE: &str = "config_change";
pub const EVENT_DIFF_FALLBACK: &str = "diff_fallback";
