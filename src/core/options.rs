//! Command input pipeline
//!
//! Binds a command's input from the resolver, then validates it. The input is
//! returned only when both steps succeed, so a structure that failed either
//! step never reaches a command handler.

use crate::core::binder::{bind, Input};
use crate::core::resolver::Resolver;
use crate::core::translate::Translator;
use crate::core::validation::validate_input;
use crate::error::InputError;

/// Bind and validate a fresh `T`
///
/// # Errors
///
/// Returns `InputError::Bind` when any field cannot be coerced (validation is
/// skipped), or `InputError::Invalid` listing every rule violation.
pub fn get_options<T: Input>(resolver: &Resolver, translator: &Translator) -> Result<T, InputError> {
    let mut input = T::default();
    bind(&mut input, resolver)?;
    validate_input(&input, translator)?;
    Ok(input)
}
