//! Core logic module
//!
//! Configuration resolution and input validation. Apart from reading the
//! profile file, this module has no I/O; that belongs in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`registry`] - Command tree and option declarations
//! - [`resolver`] - Precedence-ordered configuration lookup
//! - [`profile`] - Named profiles from `config.toml`
//! - [`global_config`] - Typed view over the options shared by every command
//! - [`log_level`] - Allowed `log-level` values
//! - [`binder`] - Binding resolved values into input structures
//! - [`validation`] - Declarative field rules
//! - [`translate`] - Rule messages per locale
//! - [`report`] - Aggregating rule violations
//! - [`options`] - Bind-then-validate pipeline for a command's input
//! - [`inputs`] - Input structures of the built-in commands

pub mod binder;
pub mod global_config;
pub mod inputs;
pub mod log_level;
pub mod options;
pub mod profile;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod translate;
pub mod validation;
