//! Reorders the per-test blocks of a manifest.
//!
//! Everything before the `) .` line closing `mf:entries` is kept as is; the
//! blank-line separated blocks after it are trimmed and sorted.

use regex::Regex;

use crate::error::{MigrateError, Result};

/// Line written in place of the matched list terminator.
pub const TERMINATOR: &str = "  ) .";

/// Whitespace, then `) .` at the end of an LF or CRLF line.
const TERMINATOR_PATTERN: &str = r"(?m)\s+\) \.\r?$";

/// One or more blank lines.
const BLANK_LINES_PATTERN: &str = r"\n[ \t]*(?:\r?\n[ \t]*)*\r?\n";

/// A manifest split at the end of its entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitManifest<'a> {
    /// Text before the terminator.
    pub preamble: &'a str,
    /// Non-empty trimmed blocks, in document order.
    pub blocks: Vec<&'a str>,
}

/// Splits `text` at the first `) .` line.
///
/// # Errors
///
/// Returns [`MigrateError::MissingTerminator`] if there is no such line.
pub fn split(text: &str) -> Result<SplitManifest<'_>> {
    let terminator = Regex::new(TERMINATOR_PATTERN)?;
    let blank_lines = Regex::new(BLANK_LINES_PATTERN)?;

    let marker = terminator
        .find(text)
        .ok_or(MigrateError::MissingTerminator)?;
    let blocks = blank_lines
        .split(&text[marker.end()..])
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();
    Ok(SplitManifest {
        preamble: &text[..marker.start()],
        blocks,
    })
}

/// Returns `text` with its entry blocks in lexical order, each separated by
/// one blank line.
///
/// # Errors
///
/// Returns [`MigrateError::MissingTerminator`] if `text` has no `) .` line.
pub fn sort_entries(text: &str) -> Result<String> {
    let SplitManifest {
        preamble,
        mut blocks,
    } = split(text)?;
    blocks.sort_unstable();

    let mut out = String::with_capacity(text.len() + TERMINATOR.len() + 2);
    out.push_str(preamble);
    out.push('\n');
    out.push_str(TERMINATOR);
    out.push('\n');
    for block in blocks {
        out.push('\n');
        out.push_str(block);
        out.push('\n');
    }
    Ok(out)
}
