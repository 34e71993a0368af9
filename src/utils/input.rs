//! User input utilities for interactive command-line prompts.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Prompts for a line of input on `writer` and reads the answer from `reader`.
///
/// The answer is returned with surrounding whitespace trimmed. An empty
/// answer is a valid answer.
///
/// # Errors
///
/// Returns an error if reading fails or the input is already closed.
pub fn prompt_from<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> Result<String> {
    write!(writer, "{prompt}: ").context("Failed to write prompt")?;
    writer.flush().context("Failed to flush prompt")?;

    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .context("Failed to read user input")?;
    if read == 0 {
        anyhow::bail!("Input closed before an answer was given");
    }

    Ok(input.trim().to_string())
}
