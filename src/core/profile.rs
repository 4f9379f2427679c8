//! Profile store
//!
//! Profiles live in `config.toml` under the config directory, one table per
//! profile:
//!
//! ```toml
//! [default]
//! realm-hostname = "example.quickbase.com"
//! user-token = "b1234_abcd"
//!
//! [sandbox]
//! realm-hostname = "sandbox.quickbase.com"
//! app-id = "bq123"
//! ```
//!
//! A missing file or a missing section yields an empty profile so resolution
//! falls through to defaults. A file that is not valid TOML is an error.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ProfileError;
use crate::infra::dirs::QbDirs;

/// Named set of raw configuration values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    name: String,
    values: BTreeMap<String, String>,
}

impl Profile {
    /// Create an empty profile
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a value; `_` in the key is normalized to `-`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(normalize_key(&key.into()), value.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn normalize_key(key: &str) -> String {
    key.replace('_', "-")
}

/// Loads profiles from a config file
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the config file in the config directory
    pub fn from_dirs(dirs: &QbDirs) -> Self {
        Self::new(dirs.config_file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the named profile
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Parse` if the file exists but is not valid TOML,
    /// and `ProfileError::Read` if it exists but cannot be read.
    pub fn load(&self, name: &str) -> Result<Profile, ProfileError> {
        let mut profile = Profile::new(name);

        let Some(table) = self.read_table()? else {
            tracing::debug!(path = %self.path.display(), "no config file, using empty profile");
            return Ok(profile);
        };

        let Some(section) = table.get(name) else {
            tracing::debug!(profile = name, "profile not found in config file");
            return Ok(profile);
        };

        let Some(section) = section.as_table() else {
            tracing::debug!(profile = name, "profile entry is not a table, ignoring");
            return Ok(profile);
        };

        for (key, value) in section {
            match raw_value(value) {
                Some(raw) => profile.insert(key.as_str(), raw),
                None => tracing::debug!(profile = name, key = %key, "ignoring non-scalar value"),
            }
        }

        tracing::debug!(profile = name, values = profile.len(), "loaded profile");
        Ok(profile)
    }

    fn read_table(&self) -> Result<Option<toml::Table>, ProfileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ProfileError::Read {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        content
            .parse::<toml::Table>()
            .map(Some)
            .map_err(|e| ProfileError::Parse {
                path: self.path.clone(),
                error: e.to_string(),
            })
    }
}

fn raw_value(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(content: &str) -> (TempDir, ProfileStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (temp_dir, ProfileStore::new(path))
    }

    #[test]
    fn test_missing_file_yields_empty_profile() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::new(temp_dir.path().join("config.toml"));

        let profile = store.load("default").unwrap();
        assert_eq!(profile.name(), "default");
        assert!(profile.is_empty());
    }

    #[test]
    fn test_missing_section_yields_empty_profile() {
        let (_dir, store) = store_with(
            r#"
[default]
realm-hostname = "example.quickbase.com"
"#,
        );

        let profile = store.load("sandbox").unwrap();
        assert_eq!(profile.name(), "sandbox");
        assert!(profile.is_empty());
    }

    #[test]
    fn test_load_named_section() {
        let (_dir, store) = store_with(
            r#"
[default]
realm-hostname = "example.quickbase.com"

[sandbox]
realm-hostname = "sandbox.quickbase.com"
user_token = "b1234"
field-id = 6
quiet = true
"#,
        );

        let profile = store.load("sandbox").unwrap();
        assert_eq!(profile.get("realm-hostname"), Some("sandbox.quickbase.com"));
        assert_eq!(profile.get("user-token"), Some("b1234"));
        assert_eq!(profile.get("field-id"), Some("6"));
        assert_eq!(profile.get("quiet"), Some("true"));
        assert_eq!(profile.len(), 4);
    }

    #[test]
    fn test_non_scalar_values_are_skipped() {
        let (_dir, store) = store_with(
            r#"
[default]
realm-hostname = "example.quickbase.com"
tags = ["a", "b"]

[default.nested]
key = "value"
"#,
        );

        let profile = store.load("default").unwrap();
        assert_eq!(profile.len(), 1);
        assert!(profile.get("tags").is_none());
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let (_dir, store) = store_with("invalid toml [[[");

        let result = store.load("default");
        assert!(matches!(result, Err(ProfileError::Parse { .. })));
    }
}
