//! Language pairs, model bundle loading, and the per-pair bundle cache.
//!
//! A [`ModelBundle`] holds everything one language pair needs: the engine
//! handle and the source/target tokenizer handles. Bundles are read-only
//! after construction; the [`BundleCache`] shares them behind `Arc` and is
//! never invalidated for the lifetime of the process.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::Device;
use crate::engine::{CompiledEngine, TranslationEngine};
use crate::tokenizer::SentencePieceModel;
use crate::ui::Style;

/// Supported language pair codes and their descriptions.
pub const SUPPORTED_PAIRS: &[(&str, &str)] = &[
    ("en-fr", "English to French"),
    ("fr-en", "French to English"),
];

/// An ordered (source, target) language combination with dedicated model
/// artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguagePair {
    EnFr,
    FrEn,
}

impl LanguagePair {
    /// The pair's config/CLI code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::EnFr => "en-fr",
            Self::FrEn => "fr-en",
        }
    }

    /// Parses a pair code.
    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "en-fr" => Ok(Self::EnFr),
            "fr-en" => Ok(Self::FrEn),
            _ => anyhow::bail!(
                "Unsupported language pair: '{code}'\n\n\
                 Run 'nmt pairs' to see supported pairs."
            ),
        }
    }

    /// Human-readable description from the supported-pairs table.
    pub fn description(self) -> &'static str {
        SUPPORTED_PAIRS
            .iter()
            .find(|(code, _)| *code == self.code())
            .map_or("", |(_, description)| description)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Prints all supported language pairs to stdout.
pub fn print_pairs() {
    println!("{}", Style::header("Supported language pairs"));
    for (code, description) in SUPPORTED_PAIRS {
        println!(
            "  {} {}",
            Style::code(format!("{code:7}")),
            Style::secondary(description)
        );
    }
}

/// File locations of one pair's model artifacts, from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPaths {
    /// Compiled translation model directory.
    pub engine_dir: PathBuf,
    /// Source-side subword model file.
    pub source_model: PathBuf,
    /// Target-side subword model file (may equal `source_model` for pairs
    /// trained with a shared vocabulary).
    pub target_model: PathBuf,
}

/// Loaded, ready-to-use handles for one language pair.
#[derive(Debug)]
pub struct ModelBundle {
    pub pair: LanguagePair,
    pub engine: Box<dyn TranslationEngine>,
    pub source_tokenizer: SentencePieceModel,
    pub target_tokenizer: SentencePieceModel,
}

impl ModelBundle {
    /// Loads the bundle for `pair` from the configured paths.
    ///
    /// Pure lookup-and-construct: loading twice is idempotent and has no
    /// side effects. Paths are not validated ahead of time; a missing
    /// artifact fails here, at first use.
    pub fn load(pair: LanguagePair, paths: &ModelPaths, device: Device) -> Result<Self> {
        let engine = CompiledEngine::load(&paths.engine_dir, device)
            .with_context(|| format!("Failed to load translation engine for '{pair}'"))?;
        let source_tokenizer = SentencePieceModel::load(&paths.source_model)
            .with_context(|| format!("Failed to load source tokenizer for '{pair}'"))?;
        let target_tokenizer = SentencePieceModel::load(&paths.target_model)
            .with_context(|| format!("Failed to load target tokenizer for '{pair}'"))?;

        Ok(Self {
            pair,
            engine: Box::new(engine),
            source_tokenizer,
            target_tokenizer,
        })
    }
}

/// Explicit per-pair bundle cache.
///
/// Replaces implicit memoization with a documented policy: a bundle is
/// loaded on first request for its pair and kept for the process lifetime;
/// entries are never invalidated. Bundles are read-only, so sharing the
/// `Arc` across submissions is safe.
#[derive(Debug, Default)]
pub struct BundleCache {
    bundles: Mutex<HashMap<LanguagePair, Arc<ModelBundle>>>,
}

impl BundleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached bundle for `pair`, loading it on first use.
    pub fn get_or_load(
        &self,
        pair: LanguagePair,
        paths: &ModelPaths,
        device: Device,
    ) -> Result<Arc<ModelBundle>> {
        let mut bundles = self
            .bundles
            .lock()
            .map_err(|_| anyhow::anyhow!("bundle cache lock poisoned"))?;

        if let Some(bundle) = bundles.get(&pair) {
            return Ok(Arc::clone(bundle));
        }

        let bundle = Arc::new(ModelBundle::load(pair, paths, device)?);
        bundles.insert(pair, Arc::clone(&bundle));
        Ok(bundle)
    }

    /// Number of loaded bundles.
    pub fn len(&self) -> usize {
        self.bundles.lock().map_or(0, |bundles| bundles.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
