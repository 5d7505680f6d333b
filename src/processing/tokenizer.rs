//! Splits a raw query result into space separated tokens.
//!
//! The raw string is escaped with the JSON string encoder first, so control
//! characters and quotes inside values show up as escape sequences (`\n`,
//! `\"`). No quoting is honoured while splitting: a value containing a space
//! is fragmented over several tokens and only the fragment carrying the label
//! is seen by the field scanner. That is a limit of the upstream rendering
//! and is kept as is.

use std::error::Error;

/// Token separator of the object-array rendering.
const SEPARATOR: char = ' ';

/// Escape `raw` and split it on single spaces.
pub fn tokenize(raw: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let escaped = escape(raw)?;
    Ok(escaped.split(SEPARATOR).map(str::to_string).collect())
}

/// JSON-escape `raw` without the surrounding quotes.
fn escape(raw: &str) -> Result<String, Box<dyn Error>> {
    let quoted = serde_json::to_string(raw).map_err(|e| format!("Error escaping result: {e}"))?;
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| format!("Escaped result not quoted: {quoted}"))?;
    Ok(inner.to_string())
}
