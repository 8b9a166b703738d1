//! SentencePiece-style subword tokenization.
//!
//! A unigram model over scored pieces, loaded from a JSON model file.
//! Encoding marks word starts with the `▁` boundary piece prefix and finds
//! the piece sequence that maximises the sum of log-probabilities (Viterbi).
//! Spans not covered by the vocabulary encode to the model's unknown piece:
//! marked, never rejected.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Word-boundary marker used inside pieces (U+2581, "▁").
pub const WORD_BOUNDARY: char = '\u{2581}';

/// Longest piece considered during encoding, in characters.
const MAX_PIECE_CHARS: usize = 32;

/// Penalty for covering one character with the unknown piece. Worse than
/// any real piece, so known vocabulary always wins.
const UNKNOWN_PIECE_SCORE: f64 = -16.0;

/// On-disk model file layout.
#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(default = "default_unk_piece")]
    unk_piece: String,
    /// `[piece, log_probability]` entries.
    pieces: Vec<(String, f64)>,
}

fn default_unk_piece() -> String {
    "<unk>".to_string()
}

/// A loaded subword model, usable for both encoding and decoding.
#[derive(Debug, Clone)]
pub struct SentencePieceModel {
    pieces: HashMap<String, f64>,
    unk_piece: String,
}

impl SentencePieceModel {
    /// Loads a model from a JSON file.
    ///
    /// The file is read at first use; a missing or unparsable model fails
    /// here with the offending path in the error chain.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tokenizer model: {}", path.display()))?;
        let model: ModelFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse tokenizer model: {}", path.display()))?;
        Ok(Self::from_entries(model.pieces, &model.unk_piece))
    }

    /// Builds a model from in-memory scored pieces.
    pub fn from_entries(entries: Vec<(String, f64)>, unk_piece: &str) -> Self {
        Self {
            pieces: entries.into_iter().collect(),
            unk_piece: unk_piece.to_string(),
        }
    }

    pub fn unk_piece(&self) -> &str {
        &self.unk_piece
    }

    pub fn vocab_size(&self) -> usize {
        self.pieces.len()
    }

    /// Encodes `text` into subword piece strings.
    ///
    /// Whitespace runs become single `▁` markers and a marker is prepended,
    /// so decoding can restore word boundaries exactly.
    pub fn encode(&self, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let marker = WORD_BOUNDARY.to_string();
        let processed = format!(
            "{marker}{}",
            trimmed
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(&marker)
        );
        self.viterbi(&processed)
    }

    /// Decodes piece strings back into text.
    pub fn decode(&self, pieces: &[String]) -> String {
        let raw: String = pieces.iter().map(String::as_str).collect();
        raw.replace(WORD_BOUNDARY, " ").trim().to_string()
    }

    /// Forward pass: `best[i]` holds the best score and incoming piece
    /// length for position `i`, where length 0 means "covered by the
    /// unknown piece". Unknown single-character steps keep every position
    /// reachable, so vocabulary pieces after an uncovered span still match.
    fn viterbi(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();
        let mut best: Vec<(f64, usize)> = vec![(f64::NEG_INFINITY, 0); n + 1];
        best[0] = (0.0, 0);

        for i in 0..n {
            let max_end = n.min(i + MAX_PIECE_CHARS);
            for end in (i + 1)..=max_end {
                let candidate: String = chars[i..end].iter().collect();
                if let Some(&score) = self.pieces.get(&candidate) {
                    let new_score = best[i].0 + score;
                    if new_score > best[end].0 {
                        best[end] = (new_score, end - i);
                    }
                }
            }

            let bridge = best[i].0 + UNKNOWN_PIECE_SCORE;
            if bridge > best[i + 1].0 {
                best[i + 1] = (bridge, 0);
            }
        }

        let mut out = Vec::new();
        let mut pos = n;
        while pos > 0 {
            let piece_len = best[pos].1;
            if piece_len == 0 {
                out.push(self.unk_piece.clone());
                pos -= 1;
                continue;
            }
            let start = pos - piece_len;
            out.push(chars[start..pos].iter().collect());
            pos = start;
        }

        out.reverse();
        out
    }
}
