//! qbcli - configuration and input validation for a Quickbase command-line client
//!
//! Merges flags, environment variables, a named profile and defaults into one
//! precedence-ordered view, then binds and validates per-command input
//! structures against declarative rules.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command tree wiring, handlers and the fatal error boundary
//! - [`core`] - Resolution, binding and validation logic
//! - [`infra`] - Infrastructure layer (directories, logging)
//! - [`config`] - Option keys and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
