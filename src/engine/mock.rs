//! Scripted engines for testing pipeline behavior.
//!
//! - [`MockEngine::working`] uppercases every piece, so outputs are
//!   deterministic and traceable back to their inputs.
//! - [`MockEngine::failing`] always errors.
//! - [`MockEngine::empty`] returns no hypotheses per sentence.
//!
//! Every variant counts calls, which lets tests assert that empty input
//! never reaches the engine.

use anyhow::{Result, bail};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{BatchOptions, Hypothesis, TokenSequence, TranslationEngine};

/// Behavior mode for the mock engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Returns an uppercased copy of each input sequence.
    Working,
    /// Always fails with an error.
    Failing,
    /// Returns an empty hypothesis list for every sentence.
    EmptyHypotheses,
}

/// Deterministic engine stand-in for tests.
#[derive(Debug)]
pub struct MockEngine {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
}

impl MockEngine {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::EmptyHypotheses)
    }

    /// Number of `translate_batch` calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter, usable after the engine moves
    /// into a bundle.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

impl TranslationEngine for MockEngine {
    fn translate_batch(
        &self,
        batch: &[TokenSequence],
        _options: &BatchOptions,
    ) -> Result<Vec<Vec<Hypothesis>>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(batch
                .iter()
                .map(|tokens| {
                    vec![Hypothesis {
                        tokens: tokens.iter().map(|t| t.to_uppercase()).collect(),
                        score: 0.0,
                    }]
                })
                .collect()),
            MockBehavior::Failing => bail!("mock engine failure"),
            MockBehavior::EmptyHypotheses => Ok(batch.iter().map(|_| Vec::new()).collect()),
        }
    }
}
