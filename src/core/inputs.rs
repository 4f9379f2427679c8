//! Command inputs
//!
//! One input structure per command, each bound from the resolver and
//! validated before it is handed to the command's handler.

use crate::config::options::{
    OPTION_APP_ID, OPTION_CHILD_TABLE_ID, OPTION_FIELD_ID, OPTION_PARENT_TABLE_ID, OPTION_TABLE_ID,
};
use crate::core::validation::RuleSpec;

crate::define_input! {
    /// Input for `app get`
    pub struct AppGetInput {
        app_id: String => OPTION_APP_ID, [RuleSpec::Required];
    }
}

crate::define_input! {
    /// Input for `table get`
    pub struct TableGetInput {
        table_id: String => OPTION_TABLE_ID, [RuleSpec::Required];
    }
}

crate::define_input! {
    /// Input for `table list`
    pub struct TableListInput {
        app_id: String => OPTION_APP_ID, [RuleSpec::Required];
    }
}

crate::define_input! {
    /// Input for `field get`
    pub struct FieldGetInput {
        table_id: String => OPTION_TABLE_ID, [RuleSpec::Required];
        field_id: i64 => OPTION_FIELD_ID, [RuleSpec::Required];
    }
}

crate::define_input! {
    /// Input for `field delete`
    pub struct FieldDeleteInput {
        table_id: String => OPTION_TABLE_ID, [RuleSpec::Required];
        // Built-in fields have ids below 6
        field_id: i64 => OPTION_FIELD_ID, [RuleSpec::Required, RuleSpec::Min(6)];
    }
}

crate::define_input! {
    /// Input for `relationship list`
    pub struct RelationshipListInput {
        child_table_id: String => OPTION_CHILD_TABLE_ID, [RuleSpec::Required];
    }
}

crate::define_input! {
    /// Input for `relationship create`
    pub struct RelationshipCreateInput {
        child_table_id: String => OPTION_CHILD_TABLE_ID, [RuleSpec::Required];
        parent_table_id: String => OPTION_PARENT_TABLE_ID, [RuleSpec::Required];
    }
}
