//! Subcommand implementations.

/// Config command handler.
pub mod config;

/// Translation command handler.
pub mod translate;

/// Usage command handler.
pub mod usage;
