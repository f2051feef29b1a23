//! Reading raw heartbeat batches from a file or stdin.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read the raw input text from `path`, or from stdin when `path` is `-`.
///
/// Failure here is a top-level run failure (unreadable source), not an
/// invalid-entry condition.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read heartbeat batch from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read heartbeat batch from {}", path.display()))
    }
}

/// Split raw input text into individual entries.
///
/// Two layouts are accepted: a top-level JSON array of entries, or JSON
/// lines with one entry per non-empty line. An input that claims to be an
/// array but does not parse is a top-level failure; in line mode an
/// unparseable line is just one bad entry and must not sink the batch, so it
/// is kept as a null entry for the validator to count as malformed.
pub fn parse_entries(content: &str) -> Result<Vec<Value>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("input is not a valid JSON array");
    }

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap_or(Value::Null))
        .collect())
}

/// Read and split a heartbeat batch in one step.
pub fn read_entries(path: &Path) -> Result<Vec<Value>> {
    parse_entries(&read_input(path)?)
}
