//! Option keys and descriptions
//!
//! Keys double as long flag names, profile keys, and (upper-cased with the
//! `QUICKBASE_` prefix) environment variable names.

use crate::config::defaults::{DEFAULT_LOG_LEVEL, DEFAULT_PROFILE};
use crate::core::registry::{OptionRegistry, OptionSpec};
use crate::error::RegistryError;

pub const OPTION_DUMP_DIRECTORY: &str = "dump-dir";
pub const OPTION_FORMAT: &str = "format";
pub const OPTION_JMESPATH_FILTER: &str = "filter";
pub const OPTION_LOG_FILE: &str = "log-file";
pub const OPTION_LOG_LEVEL: &str = "log-level";
pub const OPTION_PROFILE: &str = "profile";
pub const OPTION_QUIET: &str = "quiet";
pub const OPTION_REALM_HOSTNAME: &str = "realm-hostname";
pub const OPTION_TEMPORARY_TOKEN: &str = "temporary-token";
pub const OPTION_USER_TOKEN: &str = "user-token";

/// Not a flag; resolvable from the environment or seeded by the CLI
pub const OPTION_CONFIG_DIR: &str = "config-dir";

pub const OPTION_APP_ID: &str = "app-id";
pub const OPTION_TABLE_ID: &str = "table-id";
pub const OPTION_PARENT_TABLE_ID: &str = "parent-table-id";
pub const OPTION_CHILD_TABLE_ID: &str = "child-table-id";
pub const OPTION_FIELD_ID: &str = "field-id";

pub const OPTION_APP_ID_DESCRIPTION: &str = "unique identifier of an app (required)";
pub const OPTION_FIELD_ID_DESCRIPTION: &str = "unique identifier (fid) of the field (required)";
pub const OPTION_PARENT_TABLE_ID_DESCRIPTION: &str =
    "unique identifier (dbid) of the parent table (required)";
pub const OPTION_CHILD_TABLE_ID_DESCRIPTION: &str =
    "unique identifier (dbid) of the child table (required)";
pub const OPTION_TABLE_ID_DESCRIPTION: &str = "unique identifier (dbid) of the table (required)";
pub const OPTION_QUIET_DESCRIPTION: &str = "suppress output written to stdout";

/// Register the persistent options shared by every command on the root
pub fn register_global_options(registry: &mut OptionRegistry) -> Result<(), RegistryError> {
    let root = registry.root();
    let options = [
        OptionSpec::string(
            OPTION_DUMP_DIRECTORY,
            "",
            "directory for files that request/response are dumped to for debugging",
        )
        .short('d'),
        OptionSpec::string(
            OPTION_FORMAT,
            "",
            "display data in an alternate format, e.g., table",
        ),
        OptionSpec::string(OPTION_JMESPATH_FILTER, "", "JMESPath filter applied to output")
            .short('F'),
        OptionSpec::string(OPTION_LOG_FILE, "", "file log messages are written to").short('f'),
        OptionSpec::string(OPTION_LOG_LEVEL, DEFAULT_LOG_LEVEL, "minimum log level").short('l'),
        OptionSpec::string(OPTION_PROFILE, DEFAULT_PROFILE, "configuration profile").short('p'),
        OptionSpec::bool(OPTION_QUIET, false, OPTION_QUIET_DESCRIPTION).short('q'),
        OptionSpec::string(
            OPTION_REALM_HOSTNAME,
            "",
            "realm hostname, e.g., example.quickbase.com",
        )
        .short('r'),
        OptionSpec::string(
            OPTION_TEMPORARY_TOKEN,
            "",
            "temporary token used to authenticate API requests",
        )
        .short('t'),
        OptionSpec::string(
            OPTION_USER_TOKEN,
            "",
            "user token used to authenticate API requests",
        )
        .short('u'),
    ];

    for option in options {
        registry.register(root, option.persistent())?;
    }
    Ok(())
}
