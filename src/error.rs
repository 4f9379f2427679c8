//! Error types for qbcli
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::registry::OptionKind;
use crate::core::validation::Rule;

/// Option registry errors
///
/// These indicate a defect in how a command tree was declared and abort
/// startup immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Option name already visible from the command
    #[error("Option '{name}' is already registered on command '{command}'")]
    DuplicateOption { name: String, command: String },

    /// Shorthand already visible from the command
    #[error("Shorthand '-{shorthand}' for option '{name}' is already used by option '{existing}'")]
    DuplicateShorthand {
        shorthand: char,
        name: String,
        existing: String,
    },

    /// Option name is not lowercase kebab-case
    #[error("Option name '{name}' is not valid: expected lowercase kebab-case")]
    InvalidOptionName { name: String },

    /// Subcommand name already used under the same parent
    #[error("Command '{name}' is already registered under '{parent}'")]
    DuplicateCommand { name: String, parent: String },
}

/// A raw configuration value that cannot be read as the requested kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("value \"{raw}\" for option \"{option}\": expected {expected}")]
pub struct CoercionError {
    pub option: String,
    pub raw: String,
    pub expected: OptionKind,
}

/// Global configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigError {
    /// The realm hostname resolved to an empty value
    #[error("option \"{option}\": value required")]
    MissingHostname { option: String },

    /// The log level is not in the allowed set
    #[error("value \"{value}\" for option \"{option}\": invalid value, expected one of {allowed}")]
    InvalidLogLevel {
        option: String,
        value: String,
        allowed: String,
    },

    /// A typed global option holds a value of the wrong kind
    #[error(transparent)]
    InvalidValue(#[from] CoercionError),
}

/// Profile file errors
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: PathBuf, error: String },
}

/// A resolved value could not be coerced into an input field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("value \"{raw}\" for option \"{option}\": expected {expected}")]
pub struct BindCoercionError {
    /// Field name in the input structure
    pub field: String,
    /// Option key the field is bound to
    pub option: String,
    /// Raw resolved value
    pub raw: String,
    /// Kind the field is declared as
    pub expected: OptionKind,
}

/// Every coercion failure from one binding pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct BindErrors(pub Vec<BindCoercionError>);

impl BindErrors {
    /// The individual coercion failures, in field declaration order
    pub fn errors(&self) -> &[BindCoercionError] {
        &self.0
    }
}

/// One failed rule on one input field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Field name in the input structure
    pub field: String,
    /// Option key the field is bound to
    pub option: String,
    /// The rule that failed
    pub rule: Rule,
    /// Rendered, user-facing sentence
    pub message: String,
}

/// All rule violations for one invocation, in field declaration order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("input not valid: {}", join_messages(.errors))]
pub struct AggregatedValidationError {
    errors: Vec<ValidationError>,
}

impl AggregatedValidationError {
    /// Wrap a non-empty list of violations
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// The individual violations
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Rendered messages joined with `", "`, without the prefix
    pub fn joined_messages(&self) -> String {
        join_messages(&self.errors)
    }
}

/// Errors from binding and validating a command's input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// One or more fields could not be bound
    #[error("error getting options: {0}")]
    Bind(#[from] BindErrors),

    /// One or more fields violated a rule
    #[error(transparent)]
    Invalid(#[from] AggregatedValidationError),
}

/// Top-level qbcli error type
#[derive(Error, Debug)]
pub enum QbError {
    /// Registry error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Global configuration error
    #[error(transparent)]
    GlobalConfig(#[from] GlobalConfigError),

    /// Profile error
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),
}

fn join_messages<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
