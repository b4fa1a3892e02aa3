//! In-memory academic gradebook: users, courses, enrollments and grades
//!
//! The [`core::gradebook::Gradebook`] aggregate owns all records; the CLI in
//! `src/cli` drives it through an interactive shell and report commands.

pub mod core;

pub use core::{config, get_version};
