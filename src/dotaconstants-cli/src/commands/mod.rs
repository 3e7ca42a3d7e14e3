//! Command handlers for the dotaconstants CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod build;
pub mod sources;
pub mod transform;
