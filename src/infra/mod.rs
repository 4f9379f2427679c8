//! Infrastructure layer
//!
//! Handles I/O that the core stays free of: platform directories and log
//! output. Profile file reads live with the profile store in
//! [`crate::core::profile`].

pub mod dirs;
pub mod logging;
