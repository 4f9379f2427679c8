//! CLI command implementations
//!
//! Each command group declares its subcommands, their options and their
//! handlers in its own submodule.

pub mod app;
pub mod config;
pub mod field;
pub mod relationship;
pub mod table;

use crate::cli::Handlers;
use crate::config::defaults::{ROOT_ABOUT, ROOT_COMMAND};
use crate::config::options::register_global_options;
use crate::core::registry::OptionRegistry;
use crate::error::RegistryError;

/// Build the full command tree, filling `handlers` for every leaf command
///
/// # Errors
///
/// Returns a `RegistryError` on a conflicting declaration.
pub fn build_registry(handlers: &mut Handlers) -> Result<OptionRegistry, RegistryError> {
    let mut registry = OptionRegistry::new(ROOT_COMMAND, ROOT_ABOUT);
    register_global_options(&mut registry)?;

    app::register(&mut registry, handlers)?;
    table::register(&mut registry, handlers)?;
    field::register(&mut registry, handlers)?;
    relationship::register(&mut registry, handlers)?;
    config::register(&mut registry, handlers)?;

    Ok(registry)
}
