//! Config resolver
//!
//! Merges configuration values with a fixed precedence:
//! flag > environment > profile > default.
//!
//! Every tier stores raw strings. Typed reads coerce on the way out so a value
//! of the wrong kind is reported against the option it was read for.
//!
//! A resolver belongs to exactly one invocation; it is never shared or stored
//! in global state.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::config::defaults::ENV_PREFIX;
use crate::core::profile::Profile;
use crate::core::registry::{CommandId, OptionKind, OptionRegistry, OptionValue};
use crate::error::{CoercionError, GlobalConfigError};

/// Where a resolved value came from, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigSource {
    Flag,
    Environment,
    Profile,
    Default,
}

impl ConfigSource {
    /// Lookup order; never changes at runtime
    pub const PRECEDENCE: [ConfigSource; 4] = [
        ConfigSource::Flag,
        ConfigSource::Environment,
        ConfigSource::Profile,
        ConfigSource::Default,
    ];
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flag => "flag",
            Self::Environment => "environment",
            Self::Profile => "profile",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// A resolved raw value with its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    pub value: String,
    pub source: ConfigSource,
}

/// Environment variable that feeds the environment tier for `key`
///
/// `realm-hostname` becomes `QUICKBASE_REALM_HOSTNAME`.
pub fn env_var_name(key: &str) -> String {
    format!(
        "{ENV_PREFIX}_{}",
        key.to_ascii_uppercase().replace('-', "_")
    )
}

/// Parse a bool the way command-line tools usually accept them
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn coerce_bool(raw: &str) -> Option<bool> {
    if raw.is_empty() {
        return Some(false);
    }
    parse_bool(raw)
}

fn coerce_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse().ok()
}

/// Coerce a raw value into `kind`
///
/// An empty raw value is the kind's zero value.
fn coerce(raw: &str, kind: OptionKind) -> Option<OptionValue> {
    match kind {
        OptionKind::String => Some(OptionValue::String(raw.to_string())),
        OptionKind::Bool => coerce_bool(raw).map(OptionValue::Bool),
        OptionKind::Int => coerce_int(raw).map(OptionValue::Int),
    }
}

/// Precedence-ordered view over every configuration source of one invocation
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    flags: HashMap<String, String>,
    environment: HashMap<String, String>,
    profile: Profile,
    defaults: HashMap<String, String>,
    declared_defaults: HashMap<String, String>,
}

impl Resolver {
    /// An empty resolver with no sources
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver seeded with the declared defaults of every option visible
    /// from `command`
    pub fn for_command(registry: &OptionRegistry, command: CommandId) -> Self {
        let declared_defaults = registry
            .visible_options(command)
            .into_iter()
            .map(|spec| (spec.name.clone(), spec.default.to_raw()))
            .collect();
        Self {
            declared_defaults,
            ..Self::default()
        }
    }

    /// Replace the flag tier
    #[must_use]
    pub fn with_flags(mut self, flags: HashMap<String, String>) -> Self {
        self.flags = flags;
        self
    }

    /// Replace the environment tier with a snapshot of `vars`
    ///
    /// Only variables carrying the `QUICKBASE_` prefix are kept.
    #[must_use]
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let prefix = format!("{ENV_PREFIX}_");
        self.environment = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(&prefix))
            .collect();
        self
    }

    /// Snapshot the process environment into the environment tier
    #[must_use]
    pub fn with_process_environment(self) -> Self {
        self.with_environment(std::env::vars())
    }

    /// Replace the profile tier
    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Set an explicit flag value
    pub fn set_flag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.flags.insert(key.into(), value.into());
    }

    /// Install a programmatic default for `key`
    ///
    /// The value shadows the option's declared default but never any flag,
    /// environment or profile value. The first programmatic default for a key
    /// wins; later calls are no-ops. Returns whether the value was installed.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.defaults.contains_key(&key) {
            tracing::debug!(key = %key, "default already installed, keeping it");
            return false;
        }
        tracing::debug!(key = %key, "installing default");
        self.defaults.insert(key, value.into());
        true
    }

    /// Raw value held by a single tier
    pub fn lookup(&self, source: ConfigSource, key: &str) -> Option<&str> {
        match source {
            ConfigSource::Flag => self.flags.get(key).map(String::as_str),
            ConfigSource::Environment => self
                .environment
                .get(&env_var_name(key))
                .map(String::as_str)
                .filter(|v| !v.is_empty()),
            ConfigSource::Profile => self.profile.get(key),
            ConfigSource::Default => self
                .defaults
                .get(key)
                .or_else(|| self.declared_defaults.get(key))
                .map(String::as_str),
        }
    }

    /// Resolve `key` from the highest precedence tier holding a value
    pub fn get(&self, key: &str) -> Option<ResolvedValue> {
        ConfigSource::PRECEDENCE.into_iter().find_map(|source| {
            self.lookup(source, key).map(|value| ResolvedValue {
                value: value.to_string(),
                source,
            })
        })
    }

    /// Resolved value, or an empty string when no tier has one
    pub fn get_string(&self, key: &str) -> String {
        self.get(key).map(|r| r.value).unwrap_or_default()
    }

    /// Resolved value coerced to `kind`
    pub fn get_typed(&self, key: &str, kind: OptionKind) -> Result<OptionValue, CoercionError> {
        self.read_with(key, kind, |raw| coerce(raw, kind))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, CoercionError> {
        self.read_with(key, OptionKind::Bool, coerce_bool)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, CoercionError> {
        self.read_with(key, OptionKind::Int, coerce_int)
    }

    fn read_with<T>(
        &self,
        key: &str,
        kind: OptionKind,
        convert: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, CoercionError> {
        let raw = self.get_string(key);
        convert(&raw).ok_or_else(|| CoercionError {
            option: key.to_string(),
            raw,
            expected: kind,
        })
    }

    /// Check the invariants every invocation needs: a legal log level and a
    /// non-empty realm hostname
    pub fn validate(&self) -> Result<(), GlobalConfigError> {
        crate::core::global_config::GlobalConfig::new(self)?.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::OptionSpec;
    use proptest::prelude::*;

    fn all_tiers() -> Resolver {
        let mut resolver = Resolver::new()
            .with_flags(HashMap::from([("app-id".to_string(), "flag".to_string())]))
            .with_environment([("QUICKBASE_APP_ID", "env")])
            .with_profile(Profile::new("default").with_value("app-id", "profile"));
        resolver.set_default("app-id", "default");
        resolver
    }

    // ============================================
    // Unit Tests - Precedence
    // ============================================

    #[test]
    fn test_flag_beats_every_other_tier() {
        let resolved = all_tiers().get("app-id").unwrap();
        assert_eq!(resolved.value, "flag");
        assert_eq!(resolved.source, ConfigSource::Flag);
    }

    #[test]
    fn test_tiers_fall_through_in_order() {
        let mut resolver = all_tiers();

        resolver.flags.clear();
        let resolved = resolver.get("app-id").unwrap();
        assert_eq!((resolved.value.as_str(), resolved.source), ("env", ConfigSource::Environment));

        resolver.environment.clear();
        let resolved = resolver.get("app-id").unwrap();
        assert_eq!((resolved.value.as_str(), resolved.source), ("profile", ConfigSource::Profile));

        resolver.profile = Profile::new("default");
        let resolved = resolver.get("app-id").unwrap();
        assert_eq!((resolved.value.as_str(), resolved.source), ("default", ConfigSource::Default));

        resolver.defaults.clear();
        assert!(resolver.get("app-id").is_none());
        assert_eq!(resolver.get_string("app-id"), "");
    }

    #[test]
    fn test_empty_environment_value_is_unset() {
        let resolver = Resolver::new()
            .with_environment([("QUICKBASE_APP_ID", "")])
            .with_profile(Profile::new("default").with_value("app-id", "profile"));
        assert_eq!(resolver.get_string("app-id"), "profile");
    }

    #[test]
    fn test_empty_flag_value_is_explicit() {
        let mut resolver = Resolver::new()
            .with_profile(Profile::new("default").with_value("app-id", "profile"));
        resolver.set_flag("app-id", "");
        assert_eq!(resolver.get("app-id").unwrap().source, ConfigSource::Flag);
    }

    #[test]
    fn test_environment_ignores_unprefixed_variables() {
        let resolver = Resolver::new().with_environment([("APP_ID", "x"), ("HOME", "/root")]);
        assert!(resolver.get("app-id").is_none());
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("realm-hostname"), "QUICKBASE_REALM_HOSTNAME");
        assert_eq!(env_var_name("log-level"), "QUICKBASE_LOG_LEVEL");
        assert_eq!(env_var_name("quiet"), "QUICKBASE_QUIET");
    }

    // ============================================
    // Unit Tests - Defaults
    // ============================================

    #[test]
    fn test_set_default_does_not_override_higher_tiers() {
        let mut resolver = Resolver::new()
            .with_profile(Profile::new("default").with_value("table-id", "profile"));
        assert!(resolver.set_default("table-id", "programmatic"));
        assert_eq!(resolver.get_string("table-id"), "profile");
    }

    #[test]
    fn test_set_default_is_first_writer_wins() {
        let mut resolver = Resolver::new();
        assert!(resolver.set_default("table-id", "first"));
        assert!(!resolver.set_default("table-id", "second"));
        assert_eq!(resolver.get_string("table-id"), "first");
    }

    #[test]
    fn test_set_default_shadows_declared_default() {
        let mut registry = OptionRegistry::new("qb", "test");
        let root = registry.root();
        registry
            .register(root, OptionSpec::string("app-id", "", "app"))
            .unwrap();

        let mut resolver = Resolver::for_command(&registry, root);
        assert_eq!(resolver.get("app-id").unwrap().value, "");

        resolver.set_default("app-id", "bq123");
        let resolved = resolver.get("app-id").unwrap();
        assert_eq!(resolved.value, "bq123");
        assert_eq!(resolved.source, ConfigSource::Default);
    }

    #[test]
    fn test_declared_defaults_only_for_visible_options() {
        let mut registry = OptionRegistry::new("qb", "test");
        let root = registry.root();
        registry
            .register(root, OptionSpec::string("log-level", "notice", "level").persistent())
            .unwrap();
        registry
            .register(root, OptionSpec::int("root-only", 3, "local"))
            .unwrap();
        let child = registry.add_command(root, "app", "apps").unwrap();

        let resolver = Resolver::for_command(&registry, child);
        assert_eq!(resolver.get_string("log-level"), "notice");
        assert!(resolver.get("root-only").is_none());
    }

    // ============================================
    // Unit Tests - Typed reads
    // ============================================

    #[test]
    fn test_typed_reads() {
        let resolver = Resolver::new()
            .with_environment([("QUICKBASE_QUIET", "T"), ("QUICKBASE_FIELD_ID", " 6 ")]);
        assert!(resolver.get_bool("quiet").unwrap());
        assert_eq!(resolver.get_int("field-id").unwrap(), 6);
        assert!(!resolver.get_bool("missing").unwrap());
        assert_eq!(resolver.get_int("missing").unwrap(), 0);
    }

    #[test]
    fn test_typed_read_reports_option_and_raw_value() {
        let resolver = Resolver::new().with_environment([("QUICKBASE_QUIET", "sometimes")]);
        let err = resolver.get_bool("quiet").unwrap_err();
        assert_eq!(err.option, "quiet");
        assert_eq!(err.raw, "sometimes");
        assert_eq!(err.expected, OptionKind::Bool);
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("", OptionKind::Int), Some(OptionValue::Int(0)));
        assert_eq!(coerce("-4", OptionKind::Int), Some(OptionValue::Int(-4)));
        assert_eq!(coerce("4.5", OptionKind::Int), None);
        assert_eq!(coerce("", OptionKind::Bool), Some(OptionValue::Bool(false)));
        assert_eq!(coerce("yes", OptionKind::Bool), None);
        assert_eq!(
            coerce(" x ", OptionKind::String),
            Some(OptionValue::String(" x ".to_string()))
        );
    }

    // ============================================
    // Property-Based Tests
    // ============================================

    fn tier_value() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z0-9]{1,12}")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The resolved value always comes from the highest tier holding one
        #[test]
        fn prop_highest_tier_wins(
            flag in tier_value(),
            env in tier_value(),
            profile in tier_value(),
            default in tier_value(),
        ) {
            let mut resolver = Resolver::new();
            if let Some(v) = &flag {
                resolver.set_flag("table-id", v.clone());
            }
            if let Some(v) = &env {
                resolver = resolver.with_environment([("QUICKBASE_TABLE_ID", v.clone())]);
            }
            if let Some(v) = &profile {
                resolver = resolver.with_profile(Profile::new("default").with_value("table-id", v.clone()));
            }
            if let Some(v) = &default {
                resolver.set_default("table-id", v.clone());
            }

            let expected = [
                (flag, ConfigSource::Flag),
                (env, ConfigSource::Environment),
                (profile, ConfigSource::Profile),
                (default, ConfigSource::Default),
            ]
            .into_iter()
            .find_map(|(value, source)| value.map(|value| ResolvedValue { value, source }));

            prop_assert_eq!(resolver.get("table-id"), expected);
        }

        /// Any i64 written as text reads back as the same int
        #[test]
        fn prop_int_coercion(n: i64) {
            prop_assert_eq!(coerce(&n.to_string(), OptionKind::Int), Some(OptionValue::Int(n)));
        }
    }
}
