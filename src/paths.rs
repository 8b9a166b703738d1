//! XDG-style path utilities for configuration.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the configuration directory for nmt.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/nmt` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/nmt` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join("nmt")),
        _ => Ok(home_dir()?.join(".config").join("nmt")),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
