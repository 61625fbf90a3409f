use serde::Serialize;

use super::classify::{classify, Bucket};
use super::cleaning::clean_answer;
use super::AnswerHistory;

/// Answer history sorted into synthesis buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketedAnswers {
    pub purpose: Option<String>,
    pub audience: Option<String>,
    pub features: Vec<String>,
    pub data: Vec<String>,
    pub auth: Vec<String>,
    pub integrations: Vec<String>,
    pub deliverable: Vec<String>,
    pub exclusions: Vec<String>,
    pub timeline: Vec<String>,
    pub budget: Vec<String>,
    pub tech_stack: Vec<String>,
}

impl BucketedAnswers {
    /// Clean and classify every history entry, in key order.
    ///
    /// Only the first purpose and audience answers are kept.
    pub fn from_history(history: &AnswerHistory) -> Self {
        let mut buckets = Self::default();
        for (question, record) in history {
            let Some(answer) = clean_answer(&record.answer_text) else {
                continue;
            };
            buckets.insert(classify(question, record.category), answer);
        }
        buckets
    }

    /// Add an answer to a bucket; returns false when a singular slot is already taken
    pub fn insert(&mut self, bucket: Bucket, answer: String) -> bool {
        let list = match bucket {
            Bucket::Purpose => return fill_once(&mut self.purpose, answer),
            Bucket::Audience => return fill_once(&mut self.audience, answer),
            Bucket::Features => &mut self.features,
            Bucket::Data => &mut self.data,
            Bucket::Auth => &mut self.auth,
            Bucket::Integrations => &mut self.integrations,
            Bucket::Deliverable => &mut self.deliverable,
            Bucket::Exclusions => &mut self.exclusions,
            Bucket::Timeline => &mut self.timeline,
            Bucket::Budget => &mut self.budget,
            Bucket::TechStack => &mut self.tech_stack,
        };
        list.push(answer);
        true
    }

    /// Requirement entries in rendering order
    pub fn requirements(&self) -> impl Iterator<Item = &String> {
        self.features
            .iter()
            .chain(&self.integrations)
            .chain(&self.auth)
            .chain(&self.data)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn fill_once(slot: &mut Option<String>, answer: String) -> bool {
    if slot.is_some() {
        tracing::debug!(ignored = %answer, "Singular bucket already filled");
        return false;
    }
    *slot = Some(answer);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::QuestionCategory;
    use crate::answers::AnswerRecord;

    fn history(entries: &[(&str, &str, QuestionCategory)]) -> AnswerHistory {
        entries
            .iter()
            .map(|(q, a, c)| (q.to_string(), AnswerRecord::new(*a, *c)))
            .collect()
    }

    #[test]
    fn test_first_purpose_wins() {
        let buckets = BucketedAnswers::from_history(&history(&[
            ("A: what type of app?", "task manager", QuestionCategory::Scope),
            ("B: what kind of tool?", "crm", QuestionCategory::Scope),
        ]));
        assert_eq!(buckets.purpose.as_deref(), Some("task manager"));
        assert!(buckets.features.is_empty());
    }

    #[test]
    fn test_non_informative_answers_never_fill_slots() {
        let buckets = BucketedAnswers::from_history(&history(&[
            ("A: who is the audience?", "Not sure", QuestionCategory::Context),
            ("B: who are the users?", "Yes, for internal staff only", QuestionCategory::Context),
            ("C: which integrations?", "none", QuestionCategory::Scope),
        ]));
        assert_eq!(buckets.audience.as_deref(), Some("internal staff only"));
        assert!(buckets.integrations.is_empty());
    }

    #[test]
    fn test_requirements_order() {
        let buckets = BucketedAnswers::from_history(&history(&[
            ("1 which database?", "Postgres", QuestionCategory::Scope),
            ("2 login needed?", "Google SSO", QuestionCategory::Scope),
            ("3 which features?", "Kanban board", QuestionCategory::Scope),
            ("4 connect to which api?", "Slack", QuestionCategory::Scope),
        ]));
        let requirements: Vec<&String> = buckets.requirements().collect();
        assert_eq!(requirements, vec!["Kanban board", "Slack", "Google SSO", "Postgres"]);
    }

    #[test]
    fn test_empty_history() {
        assert!(BucketedAnswers::from_history(&AnswerHistory::new()).is_empty());
    }
}
