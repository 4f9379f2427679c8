//! Default configuration values

/// Default minimum log level
pub const DEFAULT_LOG_LEVEL: &str = "notice";

/// Profile used when none is selected
pub const DEFAULT_PROFILE: &str = "default";

/// Prefix for environment variables that feed the environment tier
pub const ENV_PREFIX: &str = "QUICKBASE";

/// Name of the profile file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Locale that always has a message template for every rule
pub const DEFAULT_LOCALE: &str = "en";

/// Prefix of the aggregated validation message
pub const INPUT_NOT_VALID: &str = "input not valid";

/// Name of the binary, used as the root command
pub const ROOT_COMMAND: &str = "qb";

/// One-line description of the root command
pub const ROOT_ABOUT: &str = "command line interface for Quickbase";

/// Tracing target of the record written when a run is aborted
///
/// Kept out of stderr logging, where the error itself is already printed.
pub const FATAL_LOG_TARGET: &str = "qbcli::fatal";
