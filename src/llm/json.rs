//! Pull the JSON payload out of a model response.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::provider::LlmError;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("fenced block regex")
});

static BRACED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("braced span regex"));

/// Strip one leading ```` ```json ```` or ```` ``` ```` fence and one
/// trailing fence from a response that is expected to be pure JSON.
pub fn extract_json_strict(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Find JSON in a chatty response: the first fenced block, else the
/// outermost `{...}` span, else the text unchanged.
pub fn extract_json_lenient(text: &str) -> &str {
    if let Some(block) = FENCED_BLOCK.captures(text).and_then(|c| c.get(1)) {
        return block.as_str().trim();
    }
    if let Some(span) = BRACED_SPAN.find(text) {
        return span.as_str();
    }
    text
}

/// Parse a strict-extracted response into `T`.
pub fn parse_strict<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(extract_json_strict(text)).map_err(LlmError::from)
}

/// Parse a lenient-extracted response into `T`.
pub fn parse_lenient<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(extract_json_lenient(text)).map_err(LlmError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_strict_strips_fences() {
        assert_eq!(extract_json_strict("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(extract_json_strict("```\n{}\n```"), "{}");
        assert_eq!(extract_json_strict("  {\"b\": 2}  "), "{\"b\": 2}");
    }

    #[test]
    fn test_strict_keeps_prose() {
        // Strict extraction does not hunt for JSON inside prose
        assert!(parse_strict::<Value>("Here you go: {\"a\": 1}").is_err());
    }

    #[test]
    fn test_lenient_prefers_fenced_block() {
        let text = "Sure!\n```json\n{\"slides\": []}\n```\nAnything else?";
        assert_eq!(extract_json_lenient(text), "{\"slides\": []}");
    }

    #[test]
    fn test_lenient_braced_span() {
        let text = "Result: {\"a\": {\"b\": 1}} done";
        let value: Value = parse_lenient(text).unwrap();
        assert_eq!(value["a"]["b"], 1);
    }

    #[test]
    fn test_lenient_passthrough() {
        assert_eq!(extract_json_lenient("[1, 2]"), "[1, 2]");
        assert!(matches!(parse_lenient::<Value>("nope"), Err(LlmError::Parse(_))));
    }
}
