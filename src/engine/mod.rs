//! Translation engine abstraction.
//!
//! The pipeline talks to the engine through the [`TranslationEngine`] trait:
//! tokenized source sentences in, ranked candidate translations out. The
//! compiled-model implementation lives in [`compiled`]; [`mock`] provides
//! scripted engines for tests.

use anyhow::Result;
use std::fmt::Debug;

pub mod compiled;
pub mod mock;

pub use compiled::CompiledEngine;
pub use mock::MockEngine;

/// One tokenized sentence: an ordered sequence of subword piece strings.
pub type TokenSequence = Vec<String>;

/// A single candidate translation for one source sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    /// Target-side subword pieces, ready for detokenization.
    pub tokens: Vec<String>,
    /// Cumulative log-probability; higher is better.
    pub score: f64,
}

/// Decoding options passed to every batch call.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Replace unknown target tokens with the corresponding source token.
    pub replace_unknowns: bool,
    /// Number of ranked hypotheses to return per sentence (at least 1).
    pub num_hypotheses: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            replace_unknowns: true,
            num_hypotheses: 1,
        }
    }
}

/// Common interface for translation engines.
///
/// Implementations must return exactly one hypothesis list per input
/// sequence, in input order; the pipeline treats any other shape as an
/// error. Engines are read-only after construction and safe to share.
pub trait TranslationEngine: Send + Sync + Debug {
    /// Translates a batch of tokenized sentences.
    ///
    /// For each input sequence, returns a list of candidate translations
    /// ranked best-first.
    fn translate_batch(
        &self,
        batch: &[TokenSequence],
        options: &BatchOptions,
    ) -> Result<Vec<Vec<Hypothesis>>>;
}
