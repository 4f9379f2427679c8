//! CLI command for `qb config show`
//!
//! Prints every global option with the value it resolved to and the tier it
//! came from. Tokens are masked.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{mask_secret, print_json};
use crate::cli::{Handlers, Invocation};
use crate::config::options::{
    OPTION_APP_ID, OPTION_CONFIG_DIR, OPTION_FIELD_ID, OPTION_TABLE_ID, OPTION_TEMPORARY_TOKEN,
    OPTION_USER_TOKEN,
};
use crate::core::registry::OptionRegistry;
use crate::core::resolver::{ConfigSource, Resolver};
use crate::error::RegistryError;

/// Keys shown besides the options visible from the command
const EXTRA_KEYS: [&str; 4] = [OPTION_CONFIG_DIR, OPTION_APP_ID, OPTION_TABLE_ID, OPTION_FIELD_ID];

/// One resolved option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub option: String,
    pub value: String,
    pub source: Option<ConfigSource>,
}

/// Declare `config` and its subcommands
pub fn register(registry: &mut OptionRegistry, handlers: &mut Handlers) -> Result<(), RegistryError> {
    let config = registry.add_command(registry.root(), "config", "inspect configuration")?;

    let show = registry.add_command(
        config,
        "show",
        "show resolved configuration values and their sources",
    )?;
    handlers.insert(show, show_config);

    Ok(())
}

/// Resolve `keys` for display
pub fn entries<'a>(resolver: &Resolver, keys: impl IntoIterator<Item = &'a str>) -> Vec<ConfigEntry> {
    keys.into_iter()
        .map(|key| {
            let resolved = resolver.get(key);
            let value = resolved.as_ref().map(|r| r.value.clone()).unwrap_or_default();
            let value = if key == OPTION_USER_TOKEN || key == OPTION_TEMPORARY_TOKEN {
                mask_secret(value)
            } else {
                value
            };
            ConfigEntry {
                option: key.to_string(),
                value,
                source: resolved.map(|r| r.source),
            }
        })
        .collect()
}

/// `qb config show`
fn show_config(invocation: &mut Invocation) -> Result<()> {
    let mut keys: Vec<&str> = invocation
        .registry()
        .visible_options(invocation.command())
        .into_iter()
        .map(|spec| spec.name.as_str())
        .collect();
    keys.extend(EXTRA_KEYS);

    let entries = entries(invocation.resolver(), keys);
    tracing::debug!(profile = invocation.config().profile(), count = entries.len(), "showing config");
    print_json(invocation.config().quiet(), &entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::Profile;

    #[test]
    fn test_entries_report_source_and_mask_tokens() {
        let mut resolver = Resolver::new()
            .with_environment([("QUICKBASE_USER_TOKEN", "b1234_abcd")])
            .with_profile(Profile::new("default").with_value("realm-hostname", "example.quickbase.com"));
        resolver.set_flag("format", "table");

        let entries = entries(
            &resolver,
            ["format", "realm-hostname", "user-token", "dump-dir"],
        );

        assert_eq!(entries[0].value, "table");
        assert_eq!(entries[0].source, Some(ConfigSource::Flag));
        assert_eq!(entries[1].source, Some(ConfigSource::Profile));
        assert_eq!(entries[2].value, "********");
        assert_eq!(entries[2].source, Some(ConfigSource::Environment));
        assert_eq!(entries[3].value, "");
        assert_eq!(entries[3].source, None);
    }
}
