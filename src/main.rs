//! qb - command-line client for Quickbase
//!
//! Entry point for the qb command-line application.

use qbcli::cli::output::fatal_if_error;
use qbcli::cli::App;

fn main() {
    let app = fatal_if_error("startup", "invalid command tree", App::new());
    fatal_if_error("run", "command failed", app.run(std::env::args_os()));
}
