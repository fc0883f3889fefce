//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

/// Exit codes for failed runs.
pub mod exit;

pub use args::{Args, Command, FormatArg};
