//! Cross-round answer history and its classification into buckets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::types::QuestionCategory;

mod buckets;
pub mod classify;
pub mod cleaning;

pub use buckets::BucketedAnswers;
pub use classify::{classify, Bucket, Rule};
pub use cleaning::clean_answer;

/// Stored answer for one question text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAnswer")]
pub struct AnswerRecord {
    #[serde(rename = "answer")]
    pub answer_text: String,
    pub category: QuestionCategory,
}

/// Accepted shapes for a history entry; older saves hold bare answer strings
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAnswer {
    Record {
        #[serde(default)]
        answer: String,
        #[serde(default)]
        category: QuestionCategory,
    },
    Text(String),
}

impl From<StoredAnswer> for AnswerRecord {
    fn from(stored: StoredAnswer) -> Self {
        match stored {
            StoredAnswer::Record { answer, category } => AnswerRecord::new(answer, category),
            StoredAnswer::Text(answer) => AnswerRecord::new(answer, QuestionCategory::General),
        }
    }
}

impl AnswerRecord {
    pub fn new(answer_text: impl Into<String>, category: QuestionCategory) -> Self {
        Self {
            answer_text: answer_text.into(),
            category,
        }
    }
}

/// Answers keyed by verbatim question text
pub type AnswerHistory = BTreeMap<String, AnswerRecord>;

/// An answer submitted during the current round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundAnswer {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: QuestionCategory,
}

/// Current round's answers keyed by round-scoped question id
pub type RoundAnswers = BTreeMap<u32, RoundAnswer>;

/// Fold a round's answers into the history, returning a new history.
///
/// Entries are keyed by question text, so a question asked again in a later
/// round overwrites its earlier answer. Blank answers are skipped.
pub fn merge(history: &AnswerHistory, round: &RoundAnswers) -> AnswerHistory {
    let mut merged = history.clone();
    for entry in round.values() {
        let answer = entry.answer.trim();
        if answer.is_empty() || entry.question.trim().is_empty() {
            continue;
        }
        merged.insert(
            entry.question.clone(),
            AnswerRecord::new(answer, entry.category),
        );
    }
    merged
}

/// True when at least one entry carries a non-blank answer
pub fn has_answers(history: &AnswerHistory) -> bool {
    history
        .values()
        .any(|record| !record.answer_text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(entries: &[(u32, &str, &str)]) -> RoundAnswers {
        entries
            .iter()
            .map(|(id, q, a)| {
                (
                    *id,
                    RoundAnswer {
                        question: q.to_string(),
                        answer: a.to_string(),
                        category: QuestionCategory::Scope,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_merging_empty_round_is_identity() {
        let mut history = AnswerHistory::new();
        history.insert("Q".into(), AnswerRecord::new("A", QuestionCategory::Context));
        assert_eq!(merge(&history, &RoundAnswers::new()), history);
    }

    #[test]
    fn test_merge_overwrites_by_question_text() {
        let first = merge(&AnswerHistory::new(), &round(&[(1, "What type of app?", "todo list")]));
        // Same text under a different round-scoped id still overwrites
        let second = merge(&first, &round(&[(3, "What type of app?", "task manager")]));

        assert_eq!(second.len(), 1);
        assert_eq!(second["What type of app?"].answer_text, "task manager");
        assert_eq!(first["What type of app?"].answer_text, "todo list");
    }

    #[test]
    fn test_merge_skips_blank_answers() {
        let merged = merge(
            &AnswerHistory::new(),
            &round(&[(1, "Budget?", "   "), (2, "Timeline?", " two weeks ")]),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["Timeline?"].answer_text, "two weeks");
    }

    #[test]
    fn test_record_serializes_with_answer_key() {
        let record = AnswerRecord::new("Postgres", QuestionCategory::Scope);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"answer": "Postgres", "category": "scope"}));
    }

    #[test]
    fn test_history_accepts_bare_answer_strings() {
        let history: AnswerHistory = serde_json::from_str(
            r#"{"Who is it for?": "students", "Which stack?": {"answer": "Rust", "category": "context"}}"#,
        )
        .unwrap();
        assert_eq!(
            history["Who is it for?"],
            AnswerRecord::new("students", QuestionCategory::General)
        );
        assert_eq!(history["Which stack?"].category, QuestionCategory::Context);
    }

    #[test]
    fn test_has_answers() {
        let mut history = AnswerHistory::new();
        assert!(!has_answers(&history));
        history.insert("Q".into(), AnswerRecord::new(" ", QuestionCategory::General));
        assert!(!has_answers(&history));
        history.insert("R".into(), AnswerRecord::new("yes", QuestionCategory::General));
        assert!(has_answers(&history));
    }
}
