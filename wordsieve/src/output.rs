//! Writing the filtered word list.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, SieveError};

/// On-disk shape of the result file: `{"words": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusWords {
    pub words: Vec<String>,
}

/// Write `words` to `path` as pretty-printed JSON.
///
/// Non-ASCII text is written as-is and no trailing newline is added. An
/// existing file is overwritten; the parent directory must already exist.
pub fn write_words(path: impl AsRef<Path>, words: &[String]) -> Result<()> {
    let path = path.as_ref();
    let document = BonusWords {
        words: words.to_vec(),
    };
    let json = serde_json::to_string_pretty(&document)?;

    std::fs::write(path, json)
        .map_err(|e| SieveError::Output(format!("Failed to write {}: {}", path.display(), e)))
}

/// Read back a file produced by [`write_words`].
pub fn read_words_json(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| SieveError::Input(format!("Failed to read {}: {}", path.display(), e)))?;
    let document: BonusWords = serde_json::from_str(&content)?;
    Ok(document.words)
}
