//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test configuration directory
///
/// Creates a temporary config directory and runs the `qb` binary against it
/// with an otherwise empty environment.
pub struct TestConfigDir {
    /// Temporary config directory
    pub dir: TempDir,
}

impl TestConfigDir {
    /// Create a new, empty config directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a config directory holding `content` as its profile file
    pub fn with_profiles(content: &str) -> Self {
        let config = Self::new();
        config.write_profiles(content);
        config
    }

    /// Get the path to the config directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Path of the profile file
    pub fn config_file(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write the profile file
    pub fn write_profiles(&self, content: &str) {
        std::fs::write(self.config_file(), content).expect("Failed to write config file");
    }

    /// Run `qb` with `args` and extra environment variables
    pub fn run(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_qb"));
        cmd.env_clear();
        cmd.env("QUICKBASE_CONFIG_DIR", self.path());
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.args(args);
        cmd.output().expect("Failed to execute qb")
    }
}

impl Default for TestConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample profile file for testing
pub const SAMPLE_PROFILES: &str = r#"
[default]
realm-hostname = "example.quickbase.com"
user-token = "b1234_abcd"
app-id = "bqapp"

[sandbox]
realm-hostname = "sandbox.quickbase.com"
table-id = "bqsandbox"
field-id = 7
"#;

/// Stdout of a finished command
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
