//! Global configuration
//!
//! A read-only snapshot of the options shared by every command, taken from a
//! [`Resolver`] once flags, environment and profile are in place. The
//! `set_default_*` helpers push a configured id into a command-specific option
//! without overriding anything the user supplied.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::options::{
    OPTION_APP_ID, OPTION_CONFIG_DIR, OPTION_DUMP_DIRECTORY, OPTION_FIELD_ID, OPTION_FORMAT,
    OPTION_JMESPATH_FILTER, OPTION_LOG_FILE, OPTION_LOG_LEVEL, OPTION_PROFILE, OPTION_QUIET,
    OPTION_REALM_HOSTNAME, OPTION_TABLE_ID, OPTION_TEMPORARY_TOKEN, OPTION_USER_TOKEN,
};
use crate::core::log_level::LogLevel;
use crate::core::resolver::Resolver;
use crate::error::{CoercionError, GlobalConfigError};

/// Configuration common to all commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalConfig {
    config_dir: PathBuf,
    default_app_id: String,
    default_field_id: String,
    default_table_id: String,
    dump_directory: String,
    format: String,
    jmespath_filter: String,
    log_file: String,
    log_level: String,
    profile: String,
    quiet: bool,
    realm_hostname: String,
    #[serde(skip)]
    temporary_token: String,
    #[serde(skip)]
    user_token: String,
}

impl GlobalConfig {
    /// Snapshot the global options from `resolver`
    ///
    /// Does not validate; call [`GlobalConfig::validate`] or use
    /// [`GlobalConfig::load`].
    pub fn new(resolver: &Resolver) -> Result<Self, CoercionError> {
        Ok(Self {
            config_dir: PathBuf::from(resolver.get_string(OPTION_CONFIG_DIR)),
            default_app_id: resolver.get_string(OPTION_APP_ID),
            default_field_id: resolver.get_string(OPTION_FIELD_ID),
            default_table_id: resolver.get_string(OPTION_TABLE_ID),
            dump_directory: resolver.get_string(OPTION_DUMP_DIRECTORY),
            format: resolver.get_string(OPTION_FORMAT),
            jmespath_filter: resolver.get_string(OPTION_JMESPATH_FILTER),
            log_file: resolver.get_string(OPTION_LOG_FILE),
            log_level: resolver.get_string(OPTION_LOG_LEVEL),
            profile: resolver.get_string(OPTION_PROFILE),
            quiet: resolver.get_bool(OPTION_QUIET)?,
            realm_hostname: resolver.get_string(OPTION_REALM_HOSTNAME),
            temporary_token: resolver.get_string(OPTION_TEMPORARY_TOKEN),
            user_token: resolver.get_string(OPTION_USER_TOKEN),
        })
    }

    /// Snapshot and validate in one step
    pub fn load(resolver: &Resolver) -> Result<Self, GlobalConfigError> {
        let config = Self::new(resolver)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the global options
    ///
    /// The log level is checked first so a bad level is reported even when the
    /// hostname is missing too.
    ///
    /// # Errors
    ///
    /// Returns `GlobalConfigError::InvalidLogLevel` naming the value and the
    /// `log-level` option, or `GlobalConfigError::MissingHostname` naming the
    /// `realm-hostname` option.
    pub fn validate(&self) -> Result<(), GlobalConfigError> {
        if self.log_level.parse::<LogLevel>().is_err() {
            return Err(GlobalConfigError::InvalidLogLevel {
                option: OPTION_LOG_LEVEL.to_string(),
                value: self.log_level.clone(),
                allowed: LogLevel::allowed(),
            });
        }

        if self.realm_hostname.is_empty() {
            return Err(GlobalConfigError::MissingHostname {
                option: OPTION_REALM_HOSTNAME.to_string(),
            });
        }

        Ok(())
    }

    /// The configuration directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The default app ID
    pub fn default_app_id(&self) -> &str {
        &self.default_app_id
    }

    /// The default field ID, if one is configured and numeric
    pub fn default_field_id(&self) -> Option<i64> {
        self.default_field_id.trim().parse().ok().filter(|id| *id != 0)
    }

    /// The default table ID
    pub fn default_table_id(&self) -> &str {
        &self.default_table_id
    }

    /// The configured dump file directory
    pub fn dump_directory(&self) -> &str {
        &self.dump_directory
    }

    /// The configured output format, e.g. table; empty means JSON
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn jmespath_filter(&self) -> &str {
        &self.jmespath_filter
    }

    pub fn log_file(&self) -> &str {
        &self.log_file
    }

    /// The configured log level, as given
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Parsed log level; `notice` if the snapshot was never validated
    pub fn level(&self) -> LogLevel {
        self.log_level.parse().unwrap_or(LogLevel::Notice)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Whether to suppress output written to stdout
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn realm_hostname(&self) -> &str {
        &self.realm_hostname
    }

    pub fn temporary_token(&self) -> &str {
        &self.temporary_token
    }

    pub fn user_token(&self) -> &str {
        &self.user_token
    }

    /// Use the configured app ID as the default for the command's `app-id`
    pub fn set_default_app_id(&self, resolver: &mut Resolver) -> bool {
        set_default_app_id(resolver, &self.default_app_id)
    }

    /// Use the configured table ID as the default for the command's `table-id`
    pub fn set_default_table_id(&self, resolver: &mut Resolver) -> bool {
        set_default_table_id(resolver, &self.default_table_id)
    }

    /// Use the configured table ID as the default for another option, e.g.
    /// `parent-table-id`
    pub fn set_default_table_id_as(&self, resolver: &mut Resolver, key: &str) -> bool {
        set_default_table_id_as(resolver, key, &self.default_table_id)
    }

    /// Use the configured field ID as the default for the command's `field-id`
    ///
    /// The raw value is installed as-is so a non-numeric ID is reported when
    /// the command's input is bound.
    pub fn set_default_field_id(&self, resolver: &mut Resolver) -> bool {
        set_default_id_as(resolver, OPTION_FIELD_ID, &self.default_field_id)
    }
}

/// Install `app_id` as the default for `app-id`; empty IDs are ignored
pub fn set_default_app_id(resolver: &mut Resolver, app_id: &str) -> bool {
    set_default_id_as(resolver, OPTION_APP_ID, app_id)
}

/// Install `table_id` as the default for `table-id`; empty IDs are ignored
pub fn set_default_table_id(resolver: &mut Resolver, table_id: &str) -> bool {
    set_default_id_as(resolver, OPTION_TABLE_ID, table_id)
}

/// Install `id` as the default for `key`; empty IDs are ignored
pub fn set_default_table_id_as(resolver: &mut Resolver, key: &str, id: &str) -> bool {
    set_default_id_as(resolver, key, id)
}

// Empty and zero IDs mean "not configured". Installing one would take the
// first-writer slot from a later, real default.
fn set_default_id_as(resolver: &mut Resolver, key: &str, id: &str) -> bool {
    if id.is_empty() || id == "0" {
        return false;
    }
    resolver.set_default(key, id)
}
