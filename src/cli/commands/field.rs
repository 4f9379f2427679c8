//! CLI commands for `qb field`

use anyhow::Result;

use crate::cli::{Handlers, Invocation};
use crate::config::options::{
    OPTION_FIELD_ID, OPTION_FIELD_ID_DESCRIPTION, OPTION_TABLE_ID, OPTION_TABLE_ID_DESCRIPTION,
};
use crate::core::inputs::{FieldDeleteInput, FieldGetInput};
use crate::core::registry::{CommandId, OptionRegistry, OptionSpec};
use crate::error::RegistryError;

/// Declare `field` and its subcommands
pub fn register(registry: &mut OptionRegistry, handlers: &mut Handlers) -> Result<(), RegistryError> {
    let field = registry.add_command(registry.root(), "field", "work with fields")?;

    let get = registry.add_command(field, "get", "get a field definition")?;
    register_field_options(registry, get)?;
    handlers.insert(get, get_field);

    let delete = registry.add_command(field, "delete", "delete a field")?;
    register_field_options(registry, delete)?;
    handlers.insert(delete, delete_field);

    Ok(())
}

fn register_field_options(registry: &mut OptionRegistry, command: CommandId) -> Result<(), RegistryError> {
    registry.register(
        command,
        OptionSpec::string(OPTION_TABLE_ID, "", OPTION_TABLE_ID_DESCRIPTION),
    )?;
    registry.register(
        command,
        OptionSpec::int(OPTION_FIELD_ID, 0, OPTION_FIELD_ID_DESCRIPTION),
    )
}

/// Positional args are `[<field-id>]`; the table comes from flags or config
fn prepare(invocation: &mut Invocation) {
    invocation.positional(0, OPTION_FIELD_ID);
    invocation.default_table_id();
    invocation.default_field_id();
}

/// `qb field get [<field-id>]`
fn get_field(invocation: &mut Invocation) -> Result<()> {
    prepare(invocation);
    let input: FieldGetInput = invocation.input();
    invocation.hand_off(&input)
}

/// `qb field delete [<field-id>]`
fn delete_field(invocation: &mut Invocation) -> Result<()> {
    prepare(invocation);
    let input: FieldDeleteInput = invocation.input();
    invocation.hand_off(&input)
}
