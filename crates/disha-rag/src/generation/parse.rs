//! Fallback JSON parsing for structured completions
//!
//! Generation services asked for "only JSON" still wrap output in code
//! fences or prose often enough that a single strict parse is not viable.
//! Parsing runs as an ordered list of strategies; the first success wins,
//! and exhausting the list yields one parse-failure error carrying the raw
//! completion for diagnostics. A strategy either fully parses or fails;
//! nothing partially-correct ever leaks through.

use serde_json::Value;

use crate::error::{Error, Result};

/// One named parse attempt
type Strategy = (&'static str, fn(&str) -> Option<Value>);

/// Strategies in the order they are tried
const STRATEGIES: &[Strategy] = &[("strict", parse_strict), ("lenient", parse_lenient)];

/// Parse a model completion expected to contain a JSON value.
pub fn parse_json_completion(raw: &str) -> Result<Value> {
    for (name, strategy) in STRATEGIES {
        if let Some(value) = strategy(raw) {
            tracing::trace!(strategy = name, "completion parsed");
            return Ok(value);
        }
    }

    Err(Error::parse_failure(
        "completion is not valid JSON under any parse strategy",
        raw,
    ))
}

/// The whole trimmed completion must be valid JSON.
fn parse_strict(raw: &str) -> Option<Value> {
    serde_json::from_str(raw.trim()).ok()
}

/// Strip code fences, then extract the outermost JSON object or array.
fn parse_lenient(raw: &str) -> Option<Value> {
    let without_fences: String = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n");

    extract_value(&without_fences, '{', '}')
        .or_else(|| extract_value(&without_fences, '[', ']'))
}

/// Slice from the first `open` to the last `close` and try to parse it.
fn extract_value(text: &str, open: char, close: char) -> Option<Value> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
