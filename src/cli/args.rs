use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nmt")]
#[command(about = "Local neural machine translation CLI")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<String>,

    /// Language pair code (e.g., en-fr, fr-en)
    #[arg(short = 'p', long = "pair")]
    pub pair: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported language pairs
    Pairs,
    /// Interactive translation session
    Repl {
        /// Language pair code (e.g., en-fr, fr-en)
        #[arg(short = 'p', long = "pair")]
        pair: Option<String>,
    },
    /// Uppercase text without translating
    Upper {
        /// File to read (reads from stdin if not provided)
        file: Option<String>,
    },
}
