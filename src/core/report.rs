//! Error reporting
//!
//! Turns a list of rule violations into the single error shown to the user.
//! The terminating boundary lives in [`crate::cli::output`].

use crate::error::{AggregatedValidationError, ValidationError};

/// Aggregate violations into one error
///
/// An empty list is success.
pub fn aggregate(errors: Vec<ValidationError>) -> Result<(), AggregatedValidationError> {
    if errors.is_empty() {
        return Ok(());
    }
    tracing::debug!(count = errors.len(), "input has rule violations");
    Err(AggregatedValidationError::new(errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::Rule;

    #[test]
    fn test_no_errors_is_ok() {
        assert!(aggregate(Vec::new()).is_ok());
    }

    #[test]
    fn test_errors_keep_order() {
        let errors = ["app-id", "table-id"]
            .iter()
            .map(|option| ValidationError {
                field: option.replace('-', "_"),
                option: (*option).to_string(),
                rule: Rule::Required,
                message: format!("{option} option is required"),
            })
            .collect();

        let err = aggregate(errors).unwrap_err();
        assert_eq!(err.errors()[0].option, "app-id");
        assert_eq!(err.errors()[1].option, "table-id");
        assert_eq!(
            err.joined_messages(),
            "app-id option is required, table-id option is required"
        );
    }
}
