//! Metadata block parsing and rendering.
//!
//! A metadata block sits at the top of a text file between two `---` lines
//! and holds one `key: value` pair per line:
//!
//! ```text
//! ---
//! First name: Ada
//! Last name: Lovelace
//! ---
//! ```
//!
//! Keys and values are trimmed. A value may be wrapped in double quotes, in
//! which case `\\`, `\"`, `\n`, `\r` and `\t` escapes are decoded; [`render`]
//! quotes every value that would not survive a plain `key: value` line.
//! Blank lines and lines starting with `#` inside the block are skipped, so
//! a key cannot begin with `#`.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;

/// Line opening and closing a metadata block.
pub const DELIMITER: &str = "---";

/// Key/value pairs of a metadata block, in document order.
pub type Metadata = IndexMap<String, String>;

/// Parse the metadata block at the start of `bytes`.
///
/// Anything after the closing delimiter is ignored. A repeated key keeps its
/// first position and takes the last value.
pub fn parse(bytes: &[u8]) -> Result<Metadata> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::Parse(format!("file is not valid UTF-8: {e}")))?;

    let mut lines = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .enumerate()
        .skip_while(|(_, l)| l.trim().is_empty());

    match lines.next() {
        Some((_, line)) if line.trim_end() == DELIMITER => {}
        _ => {
            return Err(Error::Parse(format!(
                "missing opening `{DELIMITER}` of the metadata block"
            )))
        }
    }

    let mut metadata = Metadata::new();
    for (number, line) in lines {
        let trimmed = line.trim();
        if line.trim_end() == DELIMITER {
            return Ok(metadata);
        }
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') {
            debug!("skipping comment on line {}", number + 1);
            continue;
        }

        let (key, value) = trimmed.split_once(':').ok_or_else(|| {
            Error::Parse(format!("line {}: expected `key: value`", number + 1))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Parse(format!("line {}: empty key", number + 1)));
        }
        metadata.insert(key.to_string(), unquote(value.trim()));
    }

    Err(Error::Parse(format!(
        "missing closing `{DELIMITER}` of the metadata block"
    )))
}

/// Render `pairs` as a metadata block with no trailing newline.
///
/// [`parse`] returns every value unchanged.
pub fn render<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::from(DELIMITER);
    out.push('\n');
    for (key, value) in pairs {
        out.push_str(key.as_ref());
        out.push_str(": ");
        out.push_str(&quote(value.as_ref()));
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out
}

fn needs_quotes(value: &str) -> bool {
    let padded = value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace);
    padded || value.starts_with(['"', '\'']) || value.contains(['\n', '\r'])
}

fn quote(value: &str) -> String {
    if !needs_quotes(value) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn unquote(value: &str) -> String {
    let quoted = |q: char| value.len() >= 2 && value.starts_with(q) && value.ends_with(q);
    if quoted('\'') {
        return value[1..value.len() - 1].replace("''", "'");
    }
    if !quoted('"') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value[1..value.len() - 1].chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other @ ('\\' | '"')) => out.push(other),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
