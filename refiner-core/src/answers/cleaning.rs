use regex::Regex;
use std::sync::OnceLock;

/// Answers that carry no information for synthesis
const NON_INFORMATIVE: &[&str] = &[
    "no",
    "n/a",
    "none",
    "not applicable",
    "no preference",
    "not sure",
];

fn leading_affirmation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^yes\b[,\s]*(?:(?:for|but|and|with|to)\b)?\s*").expect("valid regex")
    })
}

fn is_non_informative(answer: &str) -> bool {
    let normalized = answer
        .trim()
        .trim_end_matches(['.', '!'])
        .trim()
        .to_lowercase();
    normalized.is_empty() || NON_INFORMATIVE.contains(&normalized.as_str())
}

/// Reduce an answer to its substantive content.
///
/// Returns `None` for non-informative answers. A leading "yes" and one
/// connective word after it are dropped, so "Yes, for internal staff only"
/// becomes "internal staff only" and a bare "Yes" becomes `None`.
pub fn clean_answer(answer: &str) -> Option<String> {
    let trimmed = answer.trim();
    if is_non_informative(trimmed) {
        return None;
    }

    let affirmation = leading_affirmation();
    if !affirmation.is_match(trimmed) {
        return Some(trimmed.to_string());
    }

    let detail = affirmation.replace(trimmed, "");
    let detail = detail.trim_matches(|c: char| c.is_whitespace() || c == '.' || c == '!');
    if is_non_informative(detail) {
        None
    } else {
        Some(detail.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_informative_answers_are_dropped() {
        for answer in ["no", "N/A", "None", "Not applicable", "no preference", "NOT SURE", "Not sure.", "   "] {
            assert_eq!(clean_answer(answer), None, "{answer:?} should be dropped");
        }
    }

    #[test]
    fn test_affirmation_and_connective_are_stripped() {
        assert_eq!(
            clean_answer("Yes, for internal staff only").as_deref(),
            Some("internal staff only")
        );
        assert_eq!(clean_answer("yes with SSO").as_deref(), Some("SSO"));
        assert_eq!(clean_answer("Yes but only on mobile").as_deref(), Some("only on mobile"));
        assert_eq!(clean_answer("YES, Stripe").as_deref(), Some("Stripe"));
    }

    #[test]
    fn test_bare_affirmation_is_non_informative() {
        assert_eq!(clean_answer("Yes"), None);
        assert_eq!(clean_answer("yes."), None);
        assert_eq!(clean_answer("Yes, none"), None);
    }

    #[test]
    fn test_words_starting_with_yes_or_connectives_are_kept() {
        assert_eq!(clean_answer("yesterday's data").as_deref(), Some("yesterday's data"));
        assert_eq!(clean_answer("Yes, toronto office").as_deref(), Some("toronto office"));
    }

    #[test]
    fn test_plain_answer_is_trimmed() {
        assert_eq!(clean_answer("  task manager \n").as_deref(), Some("task manager"));
        assert_eq!(clean_answer("Nothing fancy").as_deref(), Some("Nothing fancy"));
    }
}
