//! The request-translation pipeline.
//!
//! Linear and synchronous: sentence splitting → subword encoding → batch
//! translation → subword decoding → joining. The pipeline is a pure
//! function of `(input, bundle)`: it mutates nothing outside the call and
//! produces identical output for identical input against the same bundle.
//!
//! Sentence count is preserved at every stage; an engine response with a
//! different cardinality is an error, never silently truncated or padded.

use anyhow::{Result, anyhow, ensure};

use crate::bundle::{LanguagePair, ModelBundle};
use crate::engine::BatchOptions;
use crate::sentence::split_sentences;

pub use crate::engine::TokenSequence;

/// One user submission. Immutable once created.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// Raw multi-line text; each line is translated independently.
    pub raw_text: String,
    pub pair: LanguagePair,
}

/// Translates a single input line.
///
/// Splits the line into sentences, encodes each with the source tokenizer,
/// submits the batch with unknown-token replacement enabled, keeps the top
/// hypothesis per sentence, decodes with the target tokenizer, and joins
/// the decoded sentences with a single space.
///
/// An empty or whitespace-only line yields an empty string without calling
/// the engine.
pub fn translate_line(line: &str, bundle: &ModelBundle) -> Result<String> {
    let sentences = split_sentences(line);
    if sentences.is_empty() {
        return Ok(String::new());
    }

    let batch: Vec<TokenSequence> = sentences
        .iter()
        .map(|sentence| bundle.source_tokenizer.encode(sentence))
        .collect();

    let hypotheses = bundle.engine.translate_batch(&batch, &BatchOptions::default())?;
    ensure!(
        hypotheses.len() == sentences.len(),
        "engine returned {} translations for {} sentences",
        hypotheses.len(),
        sentences.len()
    );

    let mut decoded = Vec::with_capacity(hypotheses.len());
    for ranked in &hypotheses {
        let best = ranked
            .first()
            .ok_or_else(|| anyhow!("engine returned no hypotheses for a sentence"))?;
        decoded.push(bundle.target_tokenizer.decode(&best.tokens));
    }

    Ok(decoded.join(" "))
}

/// Translates a full request, one output line per input line, in order.
pub fn translate_request(request: &TranslationRequest, bundle: &ModelBundle) -> Result<Vec<String>> {
    ensure!(
        request.pair == bundle.pair,
        "bundle for '{}' does not match requested pair '{}'",
        bundle.pair,
        request.pair
    );

    request
        .raw_text
        .split('\n')
        .map(|line| translate_line(line, bundle))
        .collect()
}
