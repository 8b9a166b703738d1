use anyhow::{Result, bail};
use std::io::{self, Write};

use crate::bundle::ModelBundle;
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::input::InputReader;
use crate::pipeline::{TranslationRequest, translate_request};
use crate::ui::Spinner;

pub struct TranslateOptions {
    pub file: Option<String>,
    pub pair: Option<String>,
}

/// One-shot translation: resolve config, read input, load the pair's model
/// bundle, run the pipeline, print one output line per input line.
pub fn run_translate(options: &TranslateOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default();
    let resolved = resolve_config(
        &ResolveOptions {
            pair: options.pair.clone(),
        },
        &config_file,
    )?;

    let source_text = InputReader::read(options.file.as_deref())?;
    if source_text.trim().is_empty() {
        bail!("Error: Input is empty");
    }

    let spinner = Spinner::new(format!("Loading {} models...", resolved.pair));
    let bundle = ModelBundle::load(resolved.pair, &resolved.paths, resolved.device)?;

    let request = TranslationRequest {
        raw_text: source_text,
        pair: resolved.pair,
    };

    spinner.set_message("Translating...");
    let translations = translate_request(&request, &bundle)?;
    spinner.stop();

    let mut stdout = io::stdout().lock();
    for line in &translations {
        writeln!(stdout, "{line}")?;
    }

    Ok(())
}
