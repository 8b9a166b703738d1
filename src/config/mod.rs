//! Configuration file management and resolution.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, Device, NmtConfig, ResolveOptions, ResolvedConfig, resolve_config,
};
