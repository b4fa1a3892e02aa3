//! Core gradebook functionality shared by the library and the CLI

pub mod config;
pub mod error;
pub mod gradebook;
pub mod identity;
pub mod models;
pub mod report;
pub mod sample;

pub use error::{GradebookError, GradebookResult};
pub use gradebook::{Gradebook, Statistics};

/// Returns the current version of the gradebook crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
