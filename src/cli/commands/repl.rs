use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, Styled};

use crate::bundle::{BundleCache, LanguagePair, print_pairs};
use crate::config::{ConfigFile, ConfigManager, ResolveOptions, resolve_config};
use crate::pipeline::translate_line;
use crate::ui::{Spinner, Style};

pub struct ReplOptions {
    pub pair: Option<String>,
}

/// Parsed REPL input.
enum Input<'a> {
    Empty,
    Command { name: &'a str, arg: Option<&'a str> },
    Text(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if let Some(rest) = trimmed.strip_prefix('/') {
        let mut parts = rest.splitn(2, char::is_whitespace);
        return Input::Command {
            name: parts.next().unwrap_or(""),
            arg: parts.next().map(str::trim).filter(|a| !a.is_empty()),
        };
    }
    Input::Text(trimmed)
}

/// An interactive translation session.
///
/// Bundles are loaded through the cache, so switching pairs back and forth
/// reloads nothing.
struct ReplSession {
    pair: LanguagePair,
    config_file: ConfigFile,
    cache: BundleCache,
}

impl ReplSession {
    fn run(&mut self) -> Result<()> {
        print_header(self.pair);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_help_message("Type text to translate, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command { name, arg } => {
                        if !self.handle_command(name, arg) {
                            break;
                        }
                    }
                    Input::Text(text) => {
                        // A failed render cycle does not end the session.
                        if let Err(e) = self.translate_and_print(text) {
                            println!("{} {e:#}", Style::error("Error:"));
                        }
                    }
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        println!("{}", Style::secondary("Bye!"));
        Ok(())
    }

    fn handle_command(&mut self, name: &str, arg: Option<&str>) -> bool {
        match name {
            "help" => {
                print_help();
                true
            }
            "pairs" => {
                print_pairs();
                true
            }
            "pair" => {
                self.set_pair(arg);
                true
            }
            "quit" | "q" => false,
            _ => {
                println!("{} Unknown command: /{name}", Style::error("Error:"));
                println!("Available: /pair, /pairs, /help, /quit");
                true
            }
        }
    }

    fn set_pair(&mut self, arg: Option<&str>) {
        let Some(code) = arg else {
            println!("Usage: /pair <code>");
            println!("Current pair: {}", Style::value(self.pair));
            return;
        };

        match LanguagePair::parse(code) {
            Ok(pair) => {
                self.pair = pair;
                println!(
                    "{} Language pair set to {}",
                    Style::success("✓"),
                    Style::value(pair)
                );
            }
            Err(e) => println!("{} {e}", Style::error("Error:")),
        }
    }

    fn translate_and_print(&self, text: &str) -> Result<()> {
        let resolved = resolve_config(
            &ResolveOptions {
                pair: Some(self.pair.code().to_string()),
            },
            &self.config_file,
        )?;

        let spinner = Spinner::new("Translating...");
        let bundle = self
            .cache
            .get_or_load(resolved.pair, &resolved.paths, resolved.device)?;
        let translation = translate_line(text, &bundle)?;
        spinner.stop();

        println!("{translation}");
        println!();
        Ok(())
    }
}

pub fn run_repl(options: &ReplOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default();
    let resolved = resolve_config(
        &ResolveOptions {
            pair: options.pair.clone(),
        },
        &config_file,
    )?;

    let mut session = ReplSession {
        pair: resolved.pair,
        config_file,
        cache: BundleCache::new(),
    };
    session.run()
}

fn print_header(pair: LanguagePair) {
    println!("{}", Style::header("nmt interactive session"));
    println!(
        "  {} {} {}",
        Style::secondary("pair:"),
        Style::value(pair),
        Style::secondary(format!("({})", pair.description()))
    );
    println!();
}

fn print_help() {
    println!("{}", Style::header("Commands"));
    for (command, summary) in [
        ("/pair <code>", "Switch language pair"),
        ("/pairs", "List supported pairs"),
        ("/help", "Show this help"),
        ("/quit", "Exit the session"),
    ] {
        // Pad before styling so ANSI escapes don't skew the columns.
        println!("  {} {summary}", Style::value(format!("{command:14}")));
    }
    println!();
}
