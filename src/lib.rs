//! # nmt - Local Neural Machine Translation CLI
//!
//! `nmt` translates text with locally stored, pre-trained model artifacts:
//! a compiled translation model plus subword tokenizer models per language
//! pair. No network access, no API keys.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a file
//! nmt ./notes.txt
//!
//! # Translate from stdin
//! echo "Hello. How are you?" | nmt --pair en-fr
//!
//! # Interactive mode
//! nmt repl
//!
//! # List supported language pairs
//! nmt pairs
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/nmt/config.toml`:
//!
//! ```toml
//! [nmt]
//! pair = "en-fr"
//! device = "cpu"
//!
//! [pairs.en-fr]
//! engine_dir   = "/models/en-fr/engine"
//! source_model = "/models/en-fr/sp-source.json"
//! target_model = "/models/en-fr/sp-target.json"
//! ```
//!
//! ## Pipeline
//!
//! Each input line flows through sentence splitting, subword encoding,
//! batch translation, subword decoding, and joining — in that order, with
//! sentence count and order preserved end to end.

/// Language pairs, model bundle loading, and the per-pair bundle cache.
pub mod bundle;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and resolution.
pub mod config;

/// Translation engine abstraction and implementations.
pub mod engine;

/// Input reading from files and stdin.
pub mod input;

/// XDG-style path utilities for configuration.
pub mod paths;

/// The request-translation pipeline.
pub mod pipeline;

/// Sentence boundary detection.
pub mod sentence;

/// SentencePiece-style subword tokenization.
pub mod tokenizer;

/// Terminal UI components (spinner, colors).
pub mod ui;
