//! Plain-text rendering of analysis results for the terminal.

use refiner_core::analysis::types::{AnalysisResult, Question, TokenUsage};
use std::fmt::Write;

pub fn quality_label(score: u8) -> &'static str {
    match score {
        8..=10 => "clear enough to start building",
        5..=7 => "some important details missing",
        _ => "critical information missing",
    }
}

pub fn format_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Quality score: {}/10 ({}), risk: {}",
        result.quality_score,
        quality_label(result.quality_score),
        result.risk_level
    );
    if !result.summary.is_empty() {
        let _ = writeln!(out, "Summary: {}", result.summary);
    }
    let _ = write!(out, "{}", format_usage(&result.token_usage));
    out
}

/// Options shown for a question; numbers typed at the answer prompt pick from these
pub fn question_options(question: &Question) -> Vec<String> {
    let parsed = question.example_options();
    if !parsed.options.is_empty() {
        return parsed.options;
    }
    question
        .suggestions
        .iter()
        .map(|s| s.option.clone())
        .collect()
}

pub fn format_question(question: &Question) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}. {}", question.category, question.id, question.text);
    if !question.explanation.is_empty() {
        let _ = writeln!(out, "    {}", question.explanation);
    }

    let parsed = question.example_options();
    let options = question_options(question);
    if let Some(label) = &parsed.label {
        let _ = writeln!(out, "    {}:", label);
    }
    if options.is_empty() {
        if !question.example_spec.trim().is_empty() {
            let _ = writeln!(out, "    e.g. {}", question.example_spec.trim());
        }
    } else {
        let numbered: Vec<String> = options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}) {}", i + 1, option))
            .collect();
        let _ = writeln!(out, "    Options: {}", numbered.join("  "));
    }

    for suggestion in &question.suggestions {
        let marker = if suggestion.recommended { " (recommended)" } else { "" };
        if suggestion.explanation.is_empty() {
            let _ = writeln!(out, "      * {}{}", suggestion.option, marker);
        } else {
            let _ = writeln!(
                out,
                "      * {}{} - {}",
                suggestion.option, marker, suggestion.explanation
            );
        }
    }
    out
}

pub fn format_usage(usage: &TokenUsage) -> String {
    format!(
        "Session tokens: {} ({} in / {} out), estimated cost ${:.4}\n",
        usage.total_tokens, usage.input_tokens, usage.output_tokens, usage.cost
    )
}

/// Show only the start and end of a credential
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
