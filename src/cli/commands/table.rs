//! CLI commands for `qb table`

use anyhow::Result;

use crate::cli::{Handlers, Invocation};
use crate::config::options::{
    OPTION_APP_ID, OPTION_APP_ID_DESCRIPTION, OPTION_TABLE_ID, OPTION_TABLE_ID_DESCRIPTION,
};
use crate::core::inputs::{TableGetInput, TableListInput};
use crate::core::registry::{OptionRegistry, OptionSpec};
use crate::error::RegistryError;

/// Declare `table` and its subcommands
pub fn register(registry: &mut OptionRegistry, handlers: &mut Handlers) -> Result<(), RegistryError> {
    let table = registry.add_command(registry.root(), "table", "work with tables")?;

    let get = registry.add_command(table, "get", "get a table definition")?;
    registry.register(
        get,
        OptionSpec::string(OPTION_TABLE_ID, "", OPTION_TABLE_ID_DESCRIPTION),
    )?;
    handlers.insert(get, get_table);

    let list = registry.add_command(table, "list", "list the tables in an app")?;
    registry.register(
        list,
        OptionSpec::string(OPTION_APP_ID, "", OPTION_APP_ID_DESCRIPTION),
    )?;
    handlers.insert(list, list_tables);

    Ok(())
}

/// `qb table get [<table-id>]`
fn get_table(invocation: &mut Invocation) -> Result<()> {
    invocation.positional(0, OPTION_TABLE_ID);
    invocation.default_table_id();

    let input: TableGetInput = invocation.input();
    invocation.hand_off(&input)
}

/// `qb table list [<app-id>]`
fn list_tables(invocation: &mut Invocation) -> Result<()> {
    invocation.positional(0, OPTION_APP_ID);
    invocation.default_app_id();

    let input: TableListInput = invocation.input();
    invocation.hand_off(&input)
}
