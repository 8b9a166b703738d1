#![allow(clippy::unwrap_used)]
//! End-to-end pipeline tests against fixture model artifacts on disk.
//!
//! These build a small English-to-French bundle (engine directory plus
//! source/target tokenizer models) in a temp directory and run real
//! translations through it, both via the library and via the binary with a
//! config file pointing at the fixtures.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use nmt_cli::bundle::{BundleCache, LanguagePair, ModelBundle, ModelPaths};
use nmt_cli::config::{ConfigFile, Device, NmtConfig};
use nmt_cli::pipeline::{TranslationRequest, translate_line, translate_request};

/// Writes a minimal en-fr bundle under `dir` and returns its paths.
fn write_fixture_bundle(dir: &Path) -> ModelPaths {
    let engine_dir = dir.join("engine");
    fs::create_dir_all(&engine_dir).unwrap();
    fs::write(
        engine_dir.join("config.json"),
        r#"{"name": "en-fr-fixture", "unk_piece": "<unk>"}"#,
    )
    .unwrap();
    fs::write(
        engine_dir.join("lexicon.json"),
        r#"{
            "▁Hello": [["▁Bonjour", -0.1]],
            "▁How": [["▁Comment", -0.2]],
            "▁are": [["▁allez", -0.3]],
            "▁you": [["▁vous", -0.2]],
            ".": [[".", -0.05]],
            "?": [["?", -0.05]]
        }"#,
    )
    .unwrap();

    let source_model = dir.join("sp-source.json");
    fs::write(
        &source_model,
        r#"{"unk_piece": "<unk>", "pieces": [
            ["▁Hello", -1.0], ["▁How", -1.1], ["▁are", -1.2],
            ["▁you", -1.0], [".", -0.5], ["?", -0.5]
        ]}"#,
    )
    .unwrap();

    let target_model = dir.join("sp-target.json");
    fs::write(
        &target_model,
        r#"{"unk_piece": "<unk>", "pieces": [
            ["▁Bonjour", -1.0], ["▁Comment", -1.1], ["▁allez", -1.2],
            ["▁vous", -1.0], [".", -0.5], ["?", -0.5]
        ]}"#,
    )
    .unwrap();

    ModelPaths {
        engine_dir,
        source_model,
        target_model,
    }
}

fn load_fixture_bundle(dir: &TempDir) -> ModelBundle {
    let paths = write_fixture_bundle(dir.path());
    ModelBundle::load(LanguagePair::EnFr, &paths, Device::Cpu).unwrap()
}

#[test]
fn test_translate_line_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let bundle = load_fixture_bundle(&dir);

    let translation = translate_line("Hello. How are you?", &bundle).unwrap();
    assert_eq!(translation, "Bonjour. Comment allez vous?");
}

#[test]
fn test_translate_request_preserves_lines() {
    let dir = TempDir::new().unwrap();
    let bundle = load_fixture_bundle(&dir);

    let request = TranslationRequest {
        raw_text: "Hello.\n\nHow are you?".to_string(),
        pair: LanguagePair::EnFr,
    };
    let result = translate_request(&request, &bundle).unwrap();

    assert_eq!(result, vec!["Bonjour.", "", "Comment allez vous?"]);
}

#[test]
fn test_unknown_word_degrades_gracefully() {
    let dir = TempDir::new().unwrap();
    let bundle = load_fixture_bundle(&dir);

    // "xyzzy" is outside the fixture vocabulary; the line still translates.
    let translation = translate_line("Hello xyzzy.", &bundle).unwrap();
    assert!(translation.starts_with("Bonjour"));
    assert!(translation.ends_with('.'));
}

#[test]
fn test_cache_serves_repeat_requests() {
    let dir = TempDir::new().unwrap();
    let paths = write_fixture_bundle(dir.path());
    let cache = BundleCache::new();

    let bundle = cache
        .get_or_load(LanguagePair::EnFr, &paths, Device::Cpu)
        .unwrap();
    let first = translate_line("Hello.", &bundle).unwrap();

    // Second request reuses the loaded bundle even after the artifacts are
    // gone from disk.
    fs::remove_file(&paths.source_model).unwrap();
    let bundle = cache
        .get_or_load(LanguagePair::EnFr, &paths, Device::Cpu)
        .unwrap();
    let second = translate_line("Hello.", &bundle).unwrap();

    assert_eq!(first, "Bonjour.");
    assert_eq!(first, second);
}

#[test]
fn test_binary_translates_with_configured_pair() {
    let dir = TempDir::new().unwrap();
    let paths = write_fixture_bundle(dir.path());

    let mut pairs = HashMap::new();
    pairs.insert("en-fr".to_string(), paths);
    let config = ConfigFile {
        nmt: NmtConfig {
            pair: Some("en-fr".to_string()),
            device: Device::Cpu,
        },
        pairs,
    };

    let config_dir = dir.path().join("config").join("nmt");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        toml::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    #[allow(deprecated)]
    let mut cmd = assert_cmd::Command::cargo_bin("nmt").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"))
        .write_stdin("Hello. How are you?\nHello.")
        .assert()
        .success()
        .stdout(predicates::str::contains("Bonjour. Comment allez vous?"))
        .stdout(predicates::str::contains("Bonjour.\n"));
}

#[test]
fn test_binary_reports_missing_artifacts() {
    let dir = TempDir::new().unwrap();

    let mut pairs = HashMap::new();
    pairs.insert(
        "en-fr".to_string(),
        ModelPaths {
            engine_dir: dir.path().join("no-such-engine"),
            source_model: dir.path().join("no-such-sp.json"),
            target_model: dir.path().join("no-such-sp.json"),
        },
    );
    let config = ConfigFile {
        nmt: NmtConfig {
            pair: Some("en-fr".to_string()),
            device: Device::Cpu,
        },
        pairs,
    };

    let config_dir = dir.path().join("config").join("nmt");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        toml::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    #[allow(deprecated)]
    let mut cmd = assert_cmd::Command::cargo_bin("nmt").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"))
        .write_stdin("Hello.")
        .assert()
        .failure()
        .stderr(predicates::str::contains("translation engine"))
        .stderr(predicates::str::contains("en-fr"));
}
