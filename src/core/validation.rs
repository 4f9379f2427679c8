//! Input validation
//!
//! Evaluates the declarative rules of a bound input structure. Every field is
//! checked in declaration order and every rule of a field is checked in order;
//! evaluation never stops at the first failure.

use std::fmt;

use serde::Serialize;

use crate::core::binder::{FieldMeta, Input};
use crate::core::registry::OptionValue;
use crate::core::report;
use crate::core::translate::Translator;
use crate::error::{AggregatedValidationError, ValidationError};

/// Rule identifier, used to look up message templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    RequiredIf,
    Min,
}

impl Rule {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::RequiredIf => "required_if",
            Self::Min => "min",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A rule attached to a field, with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSpec {
    /// The field must not hold its kind's zero value
    Required,
    /// Required when another field holds the given value; not evaluated yet
    RequiredIf {
        field: &'static str,
        value: &'static str,
    },
    /// Minimum int value; not evaluated yet
    Min(i64),
}

impl RuleSpec {
    pub const fn rule(&self) -> Rule {
        match self {
            Self::Required => Rule::Required,
            Self::RequiredIf { .. } => Rule::RequiredIf,
            Self::Min(_) => Rule::Min,
        }
    }
}

/// Evaluate every rule of every field of `input`
///
/// Returns the violations in field declaration order, each carrying the
/// field's option key and a rendered message.
pub fn validate<T: Input>(input: &T, translator: &Translator) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for meta in T::SCHEMA {
        let Some(value) = input.field(meta.field) else {
            continue;
        };

        for spec in meta.rules {
            if !check_rule(meta, spec, &value) {
                let rule = spec.rule();
                errors.push(ValidationError {
                    field: meta.field.to_string(),
                    option: meta.option_key.to_string(),
                    rule,
                    message: translator.render(rule, meta),
                });
            }
        }
    }

    errors
}

/// Validate `input` and aggregate any violations into one error
///
/// # Errors
///
/// Returns `AggregatedValidationError` listing every violation.
pub fn validate_input<T: Input>(
    input: &T,
    translator: &Translator,
) -> Result<(), AggregatedValidationError> {
    report::aggregate(validate(input, translator))
}

/// Whether `value` satisfies `spec`
fn check_rule(meta: &FieldMeta, spec: &RuleSpec, value: &OptionValue) -> bool {
    match spec {
        RuleSpec::Required => validate_required(value),
        RuleSpec::RequiredIf { field, value: expected } => {
            tracing::debug!(
                field = meta.field,
                depends_on = *field,
                expected = *expected,
                "required_if rule is not evaluated"
            );
            true
        }
        RuleSpec::Min(min) => {
            tracing::debug!(field = meta.field, min = *min, "min rule is not evaluated");
            true
        }
    }
}

/// A bool is never considered unset
fn validate_required(value: &OptionValue) -> bool {
    match value {
        OptionValue::String(s) => !s.is_empty(),
        OptionValue::Int(i) => *i != 0,
        OptionValue::Bool(_) => true,
    }
}
