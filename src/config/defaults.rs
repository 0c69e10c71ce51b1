//! Default configuration values

/// Catalog file looked up in the base directory and its ancestors
pub const CATALOG_FILE_NAME: &str = "lockstep.toml";

/// Environment variable overriding the base directory
pub const ENV_BASE_DIR: &str = "LOCKSTEP_BASE_DIR";

/// Environment variable pointing at an explicit catalog file
pub const ENV_CATALOG: &str = "LOCKSTEP_CATALOG";

/// Toolchain program used for module and cross-target steps
pub const DEFAULT_TOOLCHAIN: &str = "cargo";

/// Target triple for cross-target example builds
pub const DEFAULT_CROSS_TARGET: &str = "wasm32-unknown-unknown";

/// Exit status when a failure carries no exit code of its own
pub const GENERIC_FAILURE_EXIT_CODE: i32 = 1;

/// Signal-terminated steps exit with this base plus the signal number
pub const SIGNAL_EXIT_BASE: i32 = 128;

/// Prefix written before every echoed command line
pub const TRACE_PREFIX: &str = "+";
