//! Configuration constants
//!
//! - [`defaults`] - Default values and fixed strings
//! - [`options`] - Option keys, descriptions and the global option table

pub mod defaults;
pub mod options;
