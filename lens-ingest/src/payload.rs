//! Lenient decoding of the analyzer's response body.
//!
//! Model-backed analyzers sometimes wrap the JSON array in a Markdown code
//! fence. Anything that still fails to parse decodes to `Null`, which the
//! validator turns into an empty result.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

const FENCE_PATTERN: &str = r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$";

// Constant pattern; `test_fence_pattern_compiles` guards it.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FENCE_PATTERN).expect("fence pattern is a valid regex"));

/// Parse a response body, never failing.
pub fn decode_payload(text: &str) -> Value {
    if let Ok(v) = serde_json::from_str(text) {
        return v;
    }

    strip_fence(text)
        .and_then(|inner| serde_json::from_str(inner).ok())
        .unwrap_or(Value::Null)
}

fn strip_fence(text: &str) -> Option<&str> {
    let caps = FENCE_RE.captures(text)?;
    caps.get(1).map(|m| m.as_str())
}
