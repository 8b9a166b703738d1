//! Subcommand implementations.

/// Interactive session command handler.
pub mod repl;

/// Translation command handler.
pub mod translate;

/// Uppercasing passthrough command handler.
pub mod upper;
