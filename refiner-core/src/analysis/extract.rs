use regex::Regex;
use std::sync::OnceLock;

use super::types::BackendAnalysis;
use crate::error::AnalysisError;

const LOGGED_PREFIX_CHARS: usize = 500;

fn fenced_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"```(?:[A-Za-z0-9_-]+)?\s*\n?([\s\S]*?)\n?```").expect("valid regex")
    })
}

/// Contents of the first fenced code block, or the whole text when unfenced
pub fn extract_json_text(text: &str) -> &str {
    match fenced_block().captures(text).and_then(|caps| caps.get(1)) {
        Some(inner) => {
            tracing::debug!("Extracted JSON from fenced code block");
            inner.as_str().trim()
        }
        None => text.trim(),
    }
}

pub(crate) fn parse_analysis(text: &str) -> Result<BackendAnalysis, AnalysisError> {
    let json = extract_json_text(text);
    serde_json::from_str(json).map_err(|source| {
        let prefix: String = json.chars().take(LOGGED_PREFIX_CHARS).collect();
        tracing::error!(error = %source, response_prefix = %prefix, "Failed to parse analysis JSON");
        AnalysisError::InvalidJson {
            raw: json.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse_value(text: &str) -> Value {
        serde_json::from_str(extract_json_text(text)).unwrap()
    }

    #[test]
    fn test_fenced_json() {
        assert_eq!(parse_value("```json\n{\"a\":1}\n```"), json!({"a": 1}));
    }

    #[test]
    fn test_unfenced_json() {
        assert_eq!(parse_value("{\"a\":1}"), json!({"a": 1}));
    }

    #[test]
    fn test_fence_inside_prose() {
        let text = "Here is the analysis:\n```\n{\"a\": [1, 2]}\n```\nLet me know!";
        assert_eq!(parse_value(text), json!({"a": [1, 2]}));
    }

    #[test]
    fn test_invalid_json_keeps_raw_text() {
        let err = parse_analysis("```json\n{\"questions\": [\n```").unwrap_err();
        match err {
            AnalysisError::InvalidJson { raw, .. } => assert_eq!(raw, "{\"questions\": ["),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
