//! CLI commands for `qb app`

use anyhow::Result;

use crate::cli::{Handlers, Invocation};
use crate::config::options::{OPTION_APP_ID, OPTION_APP_ID_DESCRIPTION};
use crate::core::inputs::AppGetInput;
use crate::core::registry::{OptionRegistry, OptionSpec};
use crate::error::RegistryError;

/// Declare `app` and its subcommands
pub fn register(registry: &mut OptionRegistry, handlers: &mut Handlers) -> Result<(), RegistryError> {
    let app = registry.add_command(registry.root(), "app", "work with apps")?;

    let get = registry.add_command(app, "get", "get an app definition")?;
    registry.register(
        get,
        OptionSpec::string(OPTION_APP_ID, "", OPTION_APP_ID_DESCRIPTION),
    )?;
    handlers.insert(get, get_app);

    Ok(())
}

/// `qb app get [<app-id>]`
fn get_app(invocation: &mut Invocation) -> Result<()> {
    invocation.positional(0, OPTION_APP_ID);
    invocation.default_app_id();

    let input: AppGetInput = invocation.input();
    invocation.hand_off(&input)
}
