//! Best-effort recovery of JSON from loosely structured model text.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid fenced block regex"));

// Greedy: first opener through the last closer of the same kind.
static BRACKETED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\[.*\]|\{.*\})").expect("valid bracketed span regex"));

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("valid quoted string regex"));

/// Pull the JSON candidate out of `raw`. First match wins:
/// a fenced code block, then the first bracketed or braced span, then the
/// trimmed text itself.
pub fn extract_json(raw: &str) -> &str {
    if let Some(inner) = FENCED_BLOCK.captures(raw).and_then(|c| c.get(1)) {
        return inner.as_str().trim();
    }
    if let Some(span) = BRACKETED_SPAN.find(raw) {
        return span.as_str().trim();
    }
    raw.trim()
}

/// Double-quoted substrings of `raw`, in order, without their quotes.
pub fn quoted_strings(raw: &str) -> impl Iterator<Item = &str> {
    QUOTED
        .captures_iter(raw)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
}
