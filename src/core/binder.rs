//! Input binder
//!
//! Populates a command's input structure from a [`Resolver`]. Each input type
//! carries a static schema of [`FieldMeta`] entries, declared with
//! [`define_input!`](crate::define_input), mapping fields to option keys; there
//! is no runtime reflection.

use crate::core::registry::{OptionKind, OptionValue};
use crate::core::resolver::Resolver;
use crate::core::validation::RuleSpec;
use crate::error::{BindCoercionError, BindErrors, CoercionError};

/// Binding metadata for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Field name in the input structure
    pub field: &'static str,
    /// Option key the field is read from
    pub option_key: &'static str,
    /// Declared kind of the field
    pub kind: OptionKind,
    /// Rules evaluated in order
    pub rules: &'static [RuleSpec],
}

/// Rust types an input field may have
pub trait FieldType: Sized {
    const KIND: OptionKind;

    fn from_value(value: OptionValue) -> Option<Self>;

    fn to_value(&self) -> OptionValue;
}

impl FieldType for String {
    const KIND: OptionKind = OptionKind::String;

    fn from_value(value: OptionValue) -> Option<Self> {
        match value {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn to_value(&self) -> OptionValue {
        OptionValue::String(self.clone())
    }
}

impl FieldType for bool {
    const KIND: OptionKind = OptionKind::Bool;

    fn from_value(value: OptionValue) -> Option<Self> {
        match value {
            OptionValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn to_value(&self) -> OptionValue {
        OptionValue::Bool(*self)
    }
}

impl FieldType for i64 {
    const KIND: OptionKind = OptionKind::Int;

    fn from_value(value: OptionValue) -> Option<Self> {
        match value {
            OptionValue::Int(i) => Some(i),
            _ => None,
        }
    }

    fn to_value(&self) -> OptionValue {
        OptionValue::Int(*self)
    }
}

/// A command input structure with a static binding schema
pub trait Input: Default {
    /// Fields in declaration order
    const SCHEMA: &'static [FieldMeta];

    /// Assign a value; returns false for an unknown field or a value of the
    /// wrong kind
    fn set_field(&mut self, field: &str, value: OptionValue) -> bool;

    /// Current value of a field
    fn field(&self, field: &str) -> Option<OptionValue>;

    /// Metadata of a field by name
    fn meta(field: &str) -> Option<&'static FieldMeta> {
        Self::SCHEMA.iter().find(|meta| meta.field == field)
    }
}

/// Declare a command input structure together with its binding schema
///
/// Each field names its type (`String`, `bool` or `i64`), the option key it
/// is bound to, and optionally a list of rules.
///
/// ```
/// use qbcli::core::validation::RuleSpec;
///
/// qbcli::define_input! {
///     /// Input for getting a table
///     pub struct GetTableInput {
///         app_id: String => "app-id", [RuleSpec::Required];
///         table_id: String => "table-id", [RuleSpec::Required];
///         verbose: bool => "verbose";
///     }
/// }
///
/// use qbcli::core::binder::Input;
/// assert_eq!(GetTableInput::SCHEMA.len(), 3);
/// assert_eq!(GetTableInput::SCHEMA[1].option_key, "table-id");
/// ```
#[macro_export]
macro_rules! define_input {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty => $option:expr $(, [$($rule:expr),* $(,)?])? ;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::core::binder::Input for $name {
            const SCHEMA: &'static [$crate::core::binder::FieldMeta] = &[
                $(
                    $crate::core::binder::FieldMeta {
                        field: stringify!($field),
                        option_key: $option,
                        kind: <$ty as $crate::core::binder::FieldType>::KIND,
                        rules: &[$($($rule),*)?],
                    },
                )*
            ];

            fn set_field(
                &mut self,
                field: &str,
                value: $crate::core::registry::OptionValue,
            ) -> bool {
                $(
                    if field == stringify!($field) {
                        return match <$ty as $crate::core::binder::FieldType>::from_value(value) {
                            Some(v) => {
                                self.$field = v;
                                true
                            }
                            None => false,
                        };
                    }
                )*
                let _ = value;
                false
            }

            fn field(&self, field: &str) -> Option<$crate::core::registry::OptionValue> {
                $(
                    if field == stringify!($field) {
                        return Some($crate::core::binder::FieldType::to_value(&self.$field));
                    }
                )*
                None
            }
        }
    };
}

/// Populate every field of `input` from `resolver`
///
/// All fields are attempted; every coercion failure is collected. An input
/// that failed to bind must not be validated or used.
pub fn bind<T: Input>(input: &mut T, resolver: &Resolver) -> Result<(), BindErrors> {
    let mut errors = Vec::new();

    for meta in T::SCHEMA {
        match resolver.get_typed(meta.option_key, meta.kind) {
            Ok(value) => {
                if input.set_field(meta.field, value) {
                    tracing::debug!(field = meta.field, option = meta.option_key, "bound field");
                } else {
                    let err = CoercionError {
                        option: meta.option_key.to_string(),
                        raw: resolver.get_string(meta.option_key),
                        expected: meta.kind,
                    };
                    errors.push(bind_error(meta, err));
                }
            }
            Err(err) => errors.push(bind_error(meta, err)),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BindErrors(errors))
    }
}

fn bind_error(meta: &FieldMeta, err: CoercionError) -> BindCoercionError {
    BindCoercionError {
        field: meta.field.to_string(),
        option: err.option,
        raw: err.raw,
        expected: err.expected,
    }
}

/// Use the positional argument at `index` as the default for `option_key`
///
/// Out-of-range indexes are ignored. Returns whether a default was installed.
pub fn set_option_from_positional_arg<S: AsRef<str>>(
    resolver: &mut Resolver,
    args: &[S],
    index: usize,
    option_key: &str,
) -> bool {
    match args.get(index) {
        Some(arg) => resolver.set_default(option_key, arg.as_ref()),
        None => false,
    }
}
