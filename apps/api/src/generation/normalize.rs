//! Response normalization: strips the code fences models like to wrap
//! around a JSON payload.
//!
//! Only an exact leading fence (```` ```json ```` or bare ```` ``` ````) and an
//! exact trailing ```` ``` ```` are removed. Prose before or after the payload
//! is left in place so the parser reports it as invalid output instead of
//! guessing where the JSON starts.

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Strips surrounding code fences and whitespace from model output.
pub fn normalize_response(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix(JSON_FENCE)
        .or_else(|| text.strip_prefix(FENCE))
        .unwrap_or(text);
    let text = text.trim();
    text.strip_suffix(FENCE).unwrap_or(text).trim()
}
