//! Pull a JSON payload out of free-form model text.
//!
//! Order: a ```` ```json ```` fence, then any fence, then the widest
//! `{ ... }` span, then the input unchanged. Never fails; a bad payload is
//! caught by the caller's JSON parse.

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

pub fn extract_json(text: &str) -> &str {
    if let Some(inner) = json_fence(text) {
        return inner;
    }
    if let Some(inner) = any_fence(text) {
        return inner;
    }
    if let Some(span) = brace_span(text) {
        return span;
    }
    text
}

/// Interior of the first fence tagged `json` (case-insensitive).
fn json_fence(text: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    let start = lower.find(JSON_FENCE)? + JSON_FENCE.len();
    let len = text[start..].find(FENCE)?;
    Some(text[start..start + len].trim())
}

/// Interior of the first fence of any kind, minus a language tag line.
fn any_fence(text: &str) -> Option<&str> {
    let start = text.find(FENCE)? + FENCE.len();
    let len = text[start..].find(FENCE)?;
    Some(strip_info_string(&text[start..start + len]).trim())
}

fn strip_info_string(inner: &str) -> &str {
    match inner.split_once('\n') {
        Some((first, rest))
            if !first.trim().is_empty()
                && first.trim().chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
        {
            rest
        }
        _ => inner,
    }
}

/// First `{` through last `}`, greedy.
fn brace_span(text: &str) -> Option<&str> {
    let open = text.find('{')?;
    let close = text.rfind('}')?;
    (close > open).then(|| text[open..=close].trim())
}
