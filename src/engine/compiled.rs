//! Engine backed by a compiled model directory.
//!
//! A compiled model is a directory holding `config.json` (engine metadata)
//! and `lexicon.json` (scored source-piece → target-piece alternatives,
//! exported from the trained model). Decoding is greedy and deterministic:
//! hypothesis 0 always picks the best alternative for every piece.

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{BatchOptions, Hypothesis, TokenSequence, TranslationEngine};
use crate::config::Device;

/// Score assigned when no lexicon entry covers a source piece.
const UNKNOWN_SCORE: f64 = -10.0;

/// `config.json` layout inside a compiled model directory.
#[derive(Debug, Deserialize)]
struct EngineConfig {
    /// Model name, for diagnostics only.
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_unk_piece")]
    unk_piece: String,
}

fn default_unk_piece() -> String {
    "<unk>".to_string()
}

/// A loaded compiled model, ready for batch translation.
#[derive(Debug)]
pub struct CompiledEngine {
    name: Option<String>,
    /// Source piece → target alternatives, best-first and never empty
    /// (enforced at load).
    lexicon: HashMap<String, Vec<(String, f64)>>,
    unk_piece: String,
    device: Device,
}

impl CompiledEngine {
    /// Loads a compiled model directory.
    ///
    /// Nothing validates the directory before this call; a missing or
    /// malformed artifact fails here, at first use, with the path in the
    /// error chain.
    pub fn load(dir: &Path, device: Device) -> Result<Self> {
        let config_path = dir.join("config.json");
        let config: EngineConfig = serde_json::from_str(
            &fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read engine config: {}", config_path.display())
            })?,
        )
        .with_context(|| format!("Failed to parse engine config: {}", config_path.display()))?;

        let lexicon_path = dir.join("lexicon.json");
        let mut lexicon: HashMap<String, Vec<(String, f64)>> = serde_json::from_str(
            &fs::read_to_string(&lexicon_path).with_context(|| {
                format!("Failed to read engine lexicon: {}", lexicon_path.display())
            })?,
        )
        .with_context(|| format!("Failed to parse engine lexicon: {}", lexicon_path.display()))?;

        for (piece, alternatives) in &mut lexicon {
            ensure!(
                !alternatives.is_empty(),
                "Lexicon entry '{piece}' has no alternatives: {}",
                lexicon_path.display()
            );
            alternatives.sort_by(|a, b| b.1.total_cmp(&a.1));
        }

        Ok(Self {
            name: config.name,
            lexicon,
            unk_piece: config.unk_piece,
            device,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn device(&self) -> Device {
        self.device
    }

    /// Decodes one sentence at the given hypothesis rank.
    fn decode_at_rank(&self, tokens: &[String], rank: usize, options: &BatchOptions) -> Hypothesis {
        let mut target = Vec::with_capacity(tokens.len());
        let mut score = 0.0;

        for source_piece in tokens {
            match self.lexicon.get(source_piece) {
                Some(alternatives) => {
                    let (piece, piece_score) = &alternatives[rank.min(alternatives.len() - 1)];
                    target.push(piece.clone());
                    score += piece_score;
                }
                None => {
                    // Unknown target token: keep the source piece when the
                    // caller asked for replacement, mark it otherwise.
                    if options.replace_unknowns {
                        target.push(source_piece.clone());
                    } else {
                        target.push(self.unk_piece.clone());
                    }
                    score += UNKNOWN_SCORE;
                }
            }
        }

        Hypothesis {
            tokens: target,
            score,
        }
    }
}

impl TranslationEngine for CompiledEngine {
    fn translate_batch(
        &self,
        batch: &[TokenSequence],
        options: &BatchOptions,
    ) -> Result<Vec<Vec<Hypothesis>>> {
        ensure!(
            options.num_hypotheses >= 1,
            "num_hypotheses must be at least 1"
        );

        Ok(batch
            .iter()
            .map(|tokens| {
                (0..options.num_hypotheses)
                    .map(|rank| self.decode_at_rank(tokens, rank, options))
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_model(dir: &TempDir) {
        fs::write(
            dir.path().join("config.json"),
            r#"{"name": "test-model", "unk_piece": "<unk>"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("lexicon.json"),
            r#"{
                "▁hello": [["▁bonjour", -0.1], ["▁salut", -1.5]],
                ".": [[".", -0.01]]
            }"#,
        )
        .unwrap();
    }

    fn seq(pieces: &[&str]) -> TokenSequence {
        pieces.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_load_missing_directory_fails_at_first_use() {
        let err = CompiledEngine::load(Path::new("/nonexistent/model"), Device::Cpu).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_top_hypothesis_uses_best_alternatives() {
        let dir = TempDir::new().unwrap();
        write_model(&dir);
        let engine = CompiledEngine::load(dir.path(), Device::Cpu).unwrap();

        let result = engine
            .translate_batch(&[seq(&["\u{2581}hello", "."])], &BatchOptions::default())
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0][0].tokens, seq(&["\u{2581}bonjour", "."]));
    }

    #[test]
    fn test_ranked_hypotheses_are_ordered() {
        let dir = TempDir::new().unwrap();
        write_model(&dir);
        let engine = CompiledEngine::load(dir.path(), Device::Cpu).unwrap();

        let options = BatchOptions {
            replace_unknowns: true,
            num_hypotheses: 2,
        };
        let result = engine.translate_batch(&[seq(&["\u{2581}hello"])], &options).unwrap();

        assert_eq!(result[0].len(), 2);
        assert_eq!(result[0][0].tokens, seq(&["\u{2581}bonjour"]));
        assert_eq!(result[0][1].tokens, seq(&["\u{2581}salut"]));
        assert!(result[0][0].score > result[0][1].score);
    }

    #[test]
    fn test_empty_alternative_list_rejected_at_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"name": "test-model"}"#).unwrap();
        fs::write(dir.path().join("lexicon.json"), r#"{"▁hello": []}"#).unwrap();

        let err = CompiledEngine::load(dir.path(), Device::Cpu).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("▁hello"));
        assert!(message.contains("lexicon.json"));
    }

    #[test]
    fn test_replace_unknowns_keeps_source_piece() {
        let dir = TempDir::new().unwrap();
        write_model(&dir);
        let engine = CompiledEngine::load(dir.path(), Device::Cpu).unwrap();

        let result = engine
            .translate_batch(&[seq(&["\u{2581}xyzzy"])], &BatchOptions::default())
            .unwrap();
        assert_eq!(result[0][0].tokens, seq(&["\u{2581}xyzzy"]));
    }

    #[test]
    fn test_unknowns_marked_when_replacement_disabled() {
        let dir = TempDir::new().unwrap();
        write_model(&dir);
        let engine = CompiledEngine::load(dir.path(), Device::Cpu).unwrap();

        let options = BatchOptions {
            replace_unknowns: false,
            num_hypotheses: 1,
        };
        let result = engine.translate_batch(&[seq(&["\u{2581}xyzzy"])], &options).unwrap();
        assert_eq!(result[0][0].tokens, seq(&["<unk>"]));
    }

    #[test]
    fn test_batch_preserves_cardinality_and_order() {
        let dir = TempDir::new().unwrap();
        write_model(&dir);
        let engine = CompiledEngine::load(dir.path(), Device::Cpu).unwrap();

        let batch = vec![seq(&["\u{2581}hello"]), seq(&["."]), seq(&["\u{2581}hello", "."])];
        let result = engine.translate_batch(&batch, &BatchOptions::default()).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0][0].tokens, seq(&["\u{2581}bonjour"]));
        assert_eq!(result[1][0].tokens, seq(&["."]));
        assert_eq!(result[2][0].tokens, seq(&["\u{2581}bonjour", "."]));
    }

    #[test]
    fn test_empty_batch() {
        let dir = TempDir::new().unwrap();
        write_model(&dir);
        let engine = CompiledEngine::load(dir.path(), Device::Cpu).unwrap();

        let result = engine.translate_batch(&[], &BatchOptions::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_metadata_exposed() {
        let dir = TempDir::new().unwrap();
        write_model(&dir);
        let engine = CompiledEngine::load(dir.path(), Device::Cpu).unwrap();
        assert_eq!(engine.name(), Some("test-model"));
        assert_eq!(engine.device(), Device::Cpu);
    }
}
