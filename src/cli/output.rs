//! Output and the fatal error boundary
//!
//! Everything written to stdout or stderr by the CLI goes through here.

use std::fmt::Display;

use anyhow::Result;
use serde::Serialize;

use crate::config::defaults::{FATAL_LOG_TARGET, INPUT_NOT_VALID};
use crate::error::InputError;

/// Status message prefixes
pub mod status {
    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

/// Print an error and its causes to stderr
pub fn display_error(err: &anyhow::Error) {
    eprintln!("{} {err}", status::ERROR);
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Unwrap `result`, or log, print the error, and exit with status 1
///
/// `context` names the step that failed and `message` describes it in the
/// log; the error itself is what the user sees on stderr. The log record is
/// only written to a log file, never next to the printed error.
pub fn fatal_if_error<T, E>(context: &str, message: &str, result: Result<T, E>) -> T
where
    E: Into<anyhow::Error>,
{
    match result {
        Ok(value) => value,
        Err(err) => {
            let err = err.into();
            tracing::error!(target: FATAL_LOG_TARGET, context, error = %err, "{message}");
            display_error(&err);
            std::process::exit(1);
        }
    }
}

/// Unwrap a bound and validated input, or report why there is none and exit
///
/// Rule violations arrive joined into one message, so the user sees a single
/// error line however many fields failed.
pub fn report<T>(context: &str, result: Result<T, InputError>) -> T {
    fatal_if_error(context, INPUT_NOT_VALID, result)
}

/// Print `value` as pretty JSON unless `quiet`
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(quiet: bool, value: &T) -> Result<()> {
    if quiet {
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Mask a credential for display, keeping only whether it is set
pub fn mask_secret(value: impl Display) -> String {
    let value = value.to_string();
    if value.is_empty() {
        value
    } else {
        "********".to_string()
    }
}
