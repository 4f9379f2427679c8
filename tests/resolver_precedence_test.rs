//! Integration tests for configuration precedence
//!
//! Flag > environment > profile > default, with a profile loaded from disk.

mod common;

use common::{TestConfigDir, SAMPLE_PROFILES};
use qbcli::config::options::register_global_options;
use qbcli::core::profile::ProfileStore;
use qbcli::core::registry::{OptionRegistry, OptionSpec};
use qbcli::core::resolver::{ConfigSource, Resolver};
use qbcli::infra::dirs::QbDirs;

fn registry() -> OptionRegistry {
    let mut registry = OptionRegistry::new("qb", "test");
    register_global_options(&mut registry).unwrap();
    let root = registry.root();
    let table = registry.add_command(root, "table", "tables").unwrap();
    let get = registry.add_command(table, "get", "get").unwrap();
    registry
        .register(get, OptionSpec::string("table-id", "", "table"))
        .unwrap();
    registry
}

fn resolver_with_profile(config: &TestConfigDir, profile: &str) -> Resolver {
    let registry = registry();
    let get = registry.find_command(&["table", "get"]).unwrap();
    let store = ProfileStore::from_dirs(&QbDirs::with_config_dir(config.path()));
    Resolver::for_command(&registry, get).with_profile(store.load(profile).unwrap())
}

#[test]
fn test_profile_value_beats_declared_default() {
    let config = TestConfigDir::with_profiles(SAMPLE_PROFILES);
    let resolver = resolver_with_profile(&config, "default");

    let resolved = resolver.get("realm-hostname").unwrap();
    assert_eq!(resolved.value, "example.quickbase.com");
    assert_eq!(resolved.source, ConfigSource::Profile);

    let resolved = resolver.get("log-level").unwrap();
    assert_eq!(resolved.value, "notice");
    assert_eq!(resolved.source, ConfigSource::Default);
}

#[test]
fn test_environment_beats_profile_and_flag_beats_environment() {
    let config = TestConfigDir::with_profiles(SAMPLE_PROFILES);
    let mut resolver = resolver_with_profile(&config, "sandbox")
        .with_environment([("QUICKBASE_TABLE_ID", "bqenv")]);

    assert_eq!(resolver.get("table-id").unwrap().source, ConfigSource::Environment);

    resolver.set_flag("table-id", "bqflag");
    let resolved = resolver.get("table-id").unwrap();
    assert_eq!(resolved.value, "bqflag");
    assert_eq!(resolved.source, ConfigSource::Flag);
}

#[test]
fn test_set_default_only_fills_gaps() {
    let config = TestConfigDir::with_profiles(SAMPLE_PROFILES);

    let mut sandbox = resolver_with_profile(&config, "sandbox");
    sandbox.set_default("table-id", "bqpositional");
    assert_eq!(sandbox.get_string("table-id"), "bqsandbox");

    let mut default = resolver_with_profile(&config, "default");
    default.set_default("table-id", "bqpositional");
    let resolved = default.get("table-id").unwrap();
    assert_eq!(resolved.value, "bqpositional");
    assert_eq!(resolved.source, ConfigSource::Default);
}

#[test]
fn test_unknown_profile_falls_through_to_defaults() {
    let config = TestConfigDir::with_profiles(SAMPLE_PROFILES);
    let resolver = resolver_with_profile(&config, "missing");

    assert!(resolver.profile().is_empty());
    assert_eq!(resolver.get_string("realm-hostname"), "");
    assert_eq!(resolver.get_string("profile"), "default");
}

#[test]
fn test_missing_config_file_is_not_an_error() {
    let config = TestConfigDir::new();
    let resolver = resolver_with_profile(&config, "default");
    assert!(resolver.profile().is_empty());
}
