use anyhow::Result;
use clap::Parser;

use nmt_cli::bundle::print_pairs;
use nmt_cli::cli::commands::{repl, translate, upper};
use nmt_cli::cli::{Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Pairs) => {
            print_pairs();
        }
        Some(Command::Repl { pair }) => {
            repl::run_repl(&repl::ReplOptions { pair })?;
        }
        Some(Command::Upper { file }) => {
            upper::run_upper(file.as_deref())?;
        }
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                pair: args.pair,
            };
            translate::run_translate(&options)?;
        }
    }

    Ok(())
}
