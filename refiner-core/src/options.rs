//! Parsing of the free-form `example` field into selectable options.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::text::split_respecting_parentheses;

/// Stand-in for commas nested in parentheses while splitting
const PROTECTED_COMMA: char = '\u{1F}';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleOptions {
    /// Text before a colon, e.g. "Budget" in "Budget: Low | High"
    pub label: Option<String>,
    pub options: Vec<String>,
}

fn example_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(examples?|e\.?g\.?)[:\s]+").expect("valid regex"))
}

fn question_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(is|are|does|do|what|how|where|when|why|which|can|could|would|should|will)\b")
            .expect("valid regex")
    })
}

fn list_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(e\.?g\.?|such as|like|for example|examples?)[,:]?\s*")
            .expect("valid regex")
    })
}

fn list_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i),\s*(?:or\s+|and\s+)?|\s+or\s+|\s+and\s+").expect("valid regex")
    })
}

fn single_quoted() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"'([^']+)'").expect("valid regex"))
}

fn double_quoted() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)""#).expect("valid regex"))
}

/// Parse an example string into an optional label and a list of options.
///
/// Recognized shapes, tried in order: pipe-separated, two or more single-quoted
/// items, two or more double-quoted items, then comma/"or"/"and" lists. When
/// nothing matches the options list is empty and callers show the raw text.
pub fn parse_example_options(example: &str) -> ExampleOptions {
    let cleaned = example_prefix().replace(example.trim(), "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return ExampleOptions::default();
    }

    let (label, text) = split_label(cleaned);
    ExampleOptions {
        label,
        options: extract_options(text),
    }
}

fn split_label(text: &str) -> (Option<String>, &str) {
    let Some(colon) = text.find(':') else {
        return (None, text);
    };
    if colon == 0 || colon + 1 >= text.len() {
        return (None, text);
    }

    let before = text[..colon].trim();
    let after = text[colon + 1..].trim();
    if after.is_empty() {
        return (None, text);
    }

    if question_word().is_match(before) {
        (None, after)
    } else if before.chars().count() < 80 {
        (Some(before.to_string()), after)
    } else {
        (None, text)
    }
}

fn extract_options(text: &str) -> Vec<String> {
    if text.contains('|') {
        let parts: Vec<String> = text
            .split('|')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() >= 2 {
            return parts;
        }
    }

    for quoted in [single_quoted(), double_quoted()] {
        let matches: Vec<String> = quoted
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect();
        if matches.len() > 1 {
            return matches;
        }
    }

    if text.contains(',') {
        let cleaned = list_prefix().replace(text, "");
        let protected = protect_parenthesized_commas(cleaned.trim());
        let parts: Vec<String> = list_separator()
            .split(&protected)
            .map(|p| p.trim().replace(PROTECTED_COMMA, ","))
            .filter(|p| !p.is_empty() && p.chars().count() < 100)
            .collect();

        if parts.len() >= 2 && parts.iter().all(|p| p.chars().count() < 50) {
            return parts;
        }
    }

    Vec::new()
}

fn protect_parenthesized_commas(text: &str) -> String {
    let mut depth = 0usize;
    text.chars()
        .map(|ch| match ch {
            '(' => {
                depth += 1;
                ch
            }
            ')' => {
                depth = depth.saturating_sub(1);
                ch
            }
            ',' if depth > 0 => PROTECTED_COMMA,
            _ => ch,
        })
        .collect()
}

/// Append a picked option to an answer, skipping options already present
pub fn append_option(current: &str, option: &str) -> String {
    let current = current.trim();
    if current.is_empty() {
        return option.to_string();
    }
    if split_respecting_parentheses(current)
        .iter()
        .any(|existing| existing == option)
    {
        return current.to_string();
    }
    format!("{}, {}", current, option)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(example: &str) -> Vec<String> {
        parse_example_options(example).options
    }

    #[test]
    fn test_pipe_separated_options() {
        assert_eq!(
            options("Static website | Blog with CMS | E-commerce store | SaaS application"),
            vec!["Static website", "Blog with CMS", "E-commerce store", "SaaS application"]
        );
    }

    #[test]
    fn test_label_before_colon() {
        let parsed = parse_example_options("Budget range: Under $500 | $500 to $2000");
        assert_eq!(parsed.label.as_deref(), Some("Budget range"));
        assert_eq!(parsed.options, vec!["Under $500", "$500 to $2000"]);
    }

    #[test]
    fn test_question_before_colon_is_not_a_label() {
        let parsed = parse_example_options("What do you prefer: React, Vue, Svelte");
        assert_eq!(parsed.label, None);
        assert_eq!(parsed.options, vec!["React", "Vue", "Svelte"]);
    }

    #[test]
    fn test_example_prefix_is_stripped() {
        let parsed = parse_example_options("Examples: 'Dark mode', 'Offline sync'");
        assert_eq!(parsed.label, None);
        assert_eq!(parsed.options, vec!["Dark mode", "Offline sync"]);
    }

    #[test]
    fn test_double_quoted_options() {
        assert_eq!(
            options(r#"e.g. "Small team" or "Whole company""#),
            vec!["Small team", "Whole company"]
        );
    }

    #[test]
    fn test_comma_list_with_conjunctions_and_parentheses() {
        assert_eq!(
            options("such as email, SMS (Twilio, Vonage), or push notifications"),
            vec!["email", "SMS (Twilio, Vonage)", "push notifications"]
        );
    }

    #[test]
    fn test_long_prose_is_not_split() {
        let prose = "A dashboard that lets managers see weekly throughput per team member, \
                     with drill-down into individual tasks and their history";
        assert!(options(prose).is_empty());
    }

    #[test]
    fn test_plain_text_has_no_options() {
        assert!(options("Describe your users").is_empty());
        assert_eq!(parse_example_options(""), ExampleOptions::default());
    }

    #[test]
    fn test_append_option() {
        assert_eq!(append_option("", "React"), "React");
        assert_eq!(append_option("React", "Vue"), "React, Vue");
        assert_eq!(append_option("React, Vue", "React"), "React, Vue");
        assert_eq!(
            append_option("SMS (Twilio, Vonage)", "Vonage"),
            "SMS (Twilio, Vonage), Vonage"
        );
    }
}
