//! CLI command handlers for the gradebook.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod report;
pub mod shell;
