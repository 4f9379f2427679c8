//! CLI commands for `qb relationship`

use anyhow::Result;

use crate::cli::{Handlers, Invocation};
use crate::config::options::{
    OPTION_CHILD_TABLE_ID, OPTION_CHILD_TABLE_ID_DESCRIPTION, OPTION_PARENT_TABLE_ID,
    OPTION_PARENT_TABLE_ID_DESCRIPTION,
};
use crate::core::inputs::{RelationshipCreateInput, RelationshipListInput};
use crate::core::registry::{OptionRegistry, OptionSpec};
use crate::error::RegistryError;

/// Declare `relationship` and its subcommands
pub fn register(registry: &mut OptionRegistry, handlers: &mut Handlers) -> Result<(), RegistryError> {
    let relationship = registry.add_command(
        registry.root(),
        "relationship",
        "work with table relationships",
    )?;

    let list = registry.add_command(relationship, "list", "list the relationships of a table")?;
    registry.register(
        list,
        OptionSpec::string(OPTION_CHILD_TABLE_ID, "", OPTION_CHILD_TABLE_ID_DESCRIPTION),
    )?;
    handlers.insert(list, list_relationships);

    let create = registry.add_command(relationship, "create", "create a relationship")?;
    registry.register(
        create,
        OptionSpec::string(OPTION_CHILD_TABLE_ID, "", OPTION_CHILD_TABLE_ID_DESCRIPTION),
    )?;
    registry.register(
        create,
        OptionSpec::string(OPTION_PARENT_TABLE_ID, "", OPTION_PARENT_TABLE_ID_DESCRIPTION),
    )?;
    handlers.insert(create, create_relationship);

    Ok(())
}

/// `qb relationship list [<child-table-id>]`
fn list_relationships(invocation: &mut Invocation) -> Result<()> {
    invocation.positional(0, OPTION_CHILD_TABLE_ID);
    invocation.default_table_id_as(OPTION_CHILD_TABLE_ID);

    let input: RelationshipListInput = invocation.input();
    invocation.hand_off(&input)
}

/// `qb relationship create [<child-table-id> [<parent-table-id>]]`
///
/// The configured table only defaults the child side.
fn create_relationship(invocation: &mut Invocation) -> Result<()> {
    invocation.positional(0, OPTION_CHILD_TABLE_ID);
    invocation.positional(1, OPTION_PARENT_TABLE_ID);
    invocation.default_table_id_as(OPTION_CHILD_TABLE_ID);

    let input: RelationshipCreateInput = invocation.input();
    invocation.hand_off(&input)
}
