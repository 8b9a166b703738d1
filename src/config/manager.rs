use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::bundle::{LanguagePair, ModelPaths};
use crate::paths;

/// Inference device. Fixed per deployment in the config file, never exposed
/// per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda => write!(f, "cuda"),
        }
    }
}

/// Default settings in the `[nmt]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NmtConfig {
    /// Default language pair code (e.g. "en-fr").
    pub pair: Option<String>,
    /// Inference device.
    #[serde(default)]
    pub device: Device,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/nmt/config.toml`:
///
/// ```toml
/// [nmt]
/// pair = "en-fr"
/// device = "cpu"
///
/// [pairs.en-fr]
/// engine_dir   = "/models/en-fr/engine"
/// source_model = "/models/en-fr/sp-source.json"
/// target_model = "/models/en-fr/sp-target.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub nmt: NmtConfig,
    /// Model path tables keyed by language pair code.
    #[serde(default)]
    pub pairs: HashMap<String, ModelPaths>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub pair: LanguagePair,
    pub paths: ModelPaths,
    pub device: Device,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Language pair code override.
    pub pair: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values. Model paths are
/// looked up in the `[pairs.<code>]` table for the resolved pair; nothing
/// checks that the paths exist yet — missing artifacts fail at load time.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let code = options
        .pair
        .as_ref()
        .or(config_file.nmt.pair.as_ref())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'pair' (language pair)\n\n\
                 Please provide it via:\n  \
                 - CLI option: nmt --pair <code>\n  \
                 - Config file: ~/.config/nmt/config.toml\n\n\
                 Run 'nmt pairs' to see supported pairs."
            )
        })?;

    let pair = LanguagePair::parse(code)?;

    let paths = config_file.pairs.get(pair.code()).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "No model paths configured for language pair '{}'\n\n\
             Add a [pairs.{}] table to ~/.config/nmt/config.toml with\n  \
             engine_dir, source_model, and target_model paths.",
            pair.code(),
            pair.code()
        )
    })?;

    Ok(ResolvedConfig {
        pair,
        paths,
        device: config_file.nmt.device,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/nmt/config.toml`
    /// or `~/.config/nmt/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    pub fn load_or_default(&self) -> ConfigFile {
        self.load().unwrap_or_default()
    }
}
