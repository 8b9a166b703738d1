use anyhow::Result;
use std::io::{self, Write};

use crate::input::InputReader;

/// Uppercases input without translating. A smoke test for the input and
/// output plumbing that needs no model artifacts.
pub fn run_upper(file: Option<&str>) -> Result<()> {
    let text = InputReader::read(file)?;

    let mut stdout = io::stdout().lock();
    for line in text.lines() {
        writeln!(stdout, "{}", line.to_uppercase())?;
    }

    Ok(())
}
