use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};

use crate::ui::Style;

/// Hard input limit; larger inputs are rejected outright.
const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Character cap applied before the text reaches the pipeline. Input beyond
/// the cap is truncated, mirroring the bounded text area this tool's input
/// form once was.
pub const MAX_INPUT_CHARS: usize = 2000;

pub struct InputReader;

impl InputReader {
    /// Reads input from a file or stdin, applying the size limit and the
    /// character cap.
    pub fn read(file_path: Option<&str>) -> Result<String> {
        let text = file_path.map_or_else(Self::read_stdin, Self::read_file)?;
        Ok(Self::apply_char_cap(text))
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(
                "Error: Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                 Consider splitting the file into smaller parts.",
                size as f64 / 1024.0 / 1024.0
            );
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
    }

    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .take(MAX_INPUT_SIZE as u64 + 1)
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;

        if buffer.len() > MAX_INPUT_SIZE {
            bail!(
                "Error: Input exceeds maximum allowed size (1 MB).\n\n\
                 Consider splitting the input into smaller parts."
            );
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }

    /// Truncates to [`MAX_INPUT_CHARS`] on a character boundary, warning on
    /// stderr when anything is dropped.
    fn apply_char_cap(text: String) -> String {
        match text.char_indices().nth(MAX_INPUT_CHARS) {
            None => text,
            Some((byte_index, _)) => {
                eprintln!(
                    "{} input exceeds {MAX_INPUT_CHARS} characters; translating the first {MAX_INPUT_CHARS} only",
                    Style::warning("Warning:")
                );
                let mut truncated = text;
                truncated.truncate(byte_index);
                truncated
            }
        }
    }
}
