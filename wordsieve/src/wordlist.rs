//! Reading the input word list.

use std::path::Path;

use crate::{Result, SieveError};

/// Read a word list file: one word per line, surrounding whitespace trimmed,
/// blank lines skipped. Order and duplicates are preserved.
pub fn read_words(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| SieveError::Input(format!("Failed to read {}: {}", path.display(), e)))?;

    Ok(parse_words(&content))
}

/// Split text into words, one per non-blank line.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Besides Unicode whitespace,
/// the `\x1c`-`\x1f` separator controls are trimmed.
pub fn parse_words(content: &str) -> Vec<String> {
    content
        .split(['\n', '\r'])
        .map(|line| line.trim_matches(is_trimmed))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
