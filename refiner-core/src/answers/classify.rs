//! Keyword rules that sort answered questions into synthesis buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::types::QuestionCategory;

/// Semantic slot an answer contributes to in the synthesized prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Purpose,
    Audience,
    Features,
    Data,
    Auth,
    Integrations,
    Deliverable,
    Exclusions,
    Timeline,
    Budget,
    TechStack,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Purpose => "purpose",
            Bucket::Audience => "audience",
            Bucket::Features => "features",
            Bucket::Data => "data",
            Bucket::Auth => "auth",
            Bucket::Integrations => "integrations",
            Bucket::Deliverable => "deliverable",
            Bucket::Exclusions => "exclusions",
            Bucket::Timeline => "timeline",
            Bucket::Budget => "budget",
            Bucket::TechStack => "techStack",
        }
    }

    /// Purpose and audience hold one answer; every other bucket is a list
    pub fn is_singular(&self) -> bool {
        matches!(self, Bucket::Purpose | Bucket::Audience)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the classification table.
///
/// `category: None` applies to every category. An empty keyword list always
/// matches and acts as the fallback for its category.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Option<QuestionCategory>,
    pub keywords: &'static [&'static str],
    pub bucket: Bucket,
}

impl Rule {
    fn matches(&self, question: &str, category: QuestionCategory) -> bool {
        if self.category.is_some_and(|c| c != category) {
            return false;
        }
        self.keywords.is_empty() || self.keywords.iter().any(|kw| question.contains(kw))
    }
}

const PURPOSE_KEYWORDS: &[&str] = &["type", "kind", "purpose", "goal", "what are you building"];
const AUDIENCE_KEYWORDS: &[&str] = &["audience", "who", "users", "target", "customers", "clients"];
const DATA_KEYWORDS: &[&str] = &["data", "storage", "database", "store"];
const AUTH_KEYWORDS: &[&str] = &["authentication", "login", "user account", "sign up"];
const INTEGRATION_KEYWORDS: &[&str] = &["integration", "connect", "api", "third-party"];
const DELIVERABLE_KEYWORDS: &[&str] = &["deliverable", "output", "receive", "end result"];
const EXCLUSION_KEYWORDS: &[&str] = &["exclude", "out of scope", "not include", "skip"];
const TIMELINE_KEYWORDS: &[&str] = &["timeline", "deadline", "when", "how long"];
const BUDGET_KEYWORDS: &[&str] = &["budget", "cost", "price", "spend"];
const TECH_STACK_KEYWORDS: &[&str] = &[
    "technology",
    "framework",
    "language",
    "stack",
    "built with",
    "skill level",
    "experience",
    "who is building",
];

const SCOPE: Option<QuestionCategory> = Some(QuestionCategory::Scope);
const CONTEXT: Option<QuestionCategory> = Some(QuestionCategory::Context);

/// Evaluated top to bottom; the first matching rule wins
pub const RULES: &[Rule] = &[
    Rule { category: None, keywords: PURPOSE_KEYWORDS, bucket: Bucket::Purpose },
    Rule { category: None, keywords: AUDIENCE_KEYWORDS, bucket: Bucket::Audience },
    Rule { category: SCOPE, keywords: DATA_KEYWORDS, bucket: Bucket::Data },
    Rule { category: SCOPE, keywords: AUTH_KEYWORDS, bucket: Bucket::Auth },
    Rule { category: SCOPE, keywords: INTEGRATION_KEYWORDS, bucket: Bucket::Integrations },
    Rule { category: SCOPE, keywords: DELIVERABLE_KEYWORDS, bucket: Bucket::Deliverable },
    Rule { category: SCOPE, keywords: EXCLUSION_KEYWORDS, bucket: Bucket::Exclusions },
    Rule { category: SCOPE, keywords: &[], bucket: Bucket::Features },
    Rule { category: CONTEXT, keywords: TIMELINE_KEYWORDS, bucket: Bucket::Timeline },
    Rule { category: CONTEXT, keywords: BUDGET_KEYWORDS, bucket: Bucket::Budget },
    Rule { category: CONTEXT, keywords: TECH_STACK_KEYWORDS, bucket: Bucket::TechStack },
    Rule { category: CONTEXT, keywords: &[], bucket: Bucket::Budget },
    Rule { category: None, keywords: DELIVERABLE_KEYWORDS, bucket: Bucket::Deliverable },
    Rule { category: None, keywords: EXCLUSION_KEYWORDS, bucket: Bucket::Exclusions },
    Rule { category: None, keywords: &[], bucket: Bucket::Features },
];

/// Pick the bucket for a question. Matching is case-insensitive substring search.
pub fn classify(question: &str, category: QuestionCategory) -> Bucket {
    classify_with(RULES, question, category).unwrap_or(Bucket::Features)
}

/// Evaluate an arbitrary rule table; `None` when no rule matches
pub fn classify_with(rules: &[Rule], question: &str, category: QuestionCategory) -> Option<Bucket> {
    let question = question.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&question, category))
        .map(|rule| rule.bucket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use QuestionCategory::*;

    #[test]
    fn test_purpose_keywords_precede_category_dispatch() {
        assert_eq!(
            classify("What type of application are you building?", Scope),
            Bucket::Purpose
        );
        assert_eq!(classify("What is the main GOAL?", Context), Bucket::Purpose);
    }

    #[test]
    fn test_audience_keywords() {
        assert_eq!(classify("Who will use this?", Scope), Bucket::Audience);
        assert_eq!(classify("Are your customers technical?", General), Bucket::Audience);
    }

    #[test]
    fn test_scope_subcategories() {
        assert_eq!(classify("Where should records be stored?", Scope), Bucket::Data);
        assert_eq!(classify("Do you need login?", Scope), Bucket::Auth);
        assert_eq!(classify("Which API should it connect to?", Scope), Bucket::Integrations);
        assert_eq!(classify("What should the end result be?", Scope), Bucket::Deliverable);
        assert_eq!(classify("Anything to exclude?", Scope), Bucket::Exclusions);
        assert_eq!(classify("Which features matter most?", Scope), Bucket::Features);
    }

    #[test]
    fn test_context_subcategories_fall_back_to_budget() {
        assert_eq!(classify("What is your deadline?", Context), Bucket::Timeline);
        assert_eq!(classify("How much can you spend?", Context), Bucket::Budget);
        assert_eq!(classify("Which framework do you prefer?", Context), Bucket::TechStack);
        assert_eq!(classify("Any regulatory concerns?", Context), Bucket::Budget);
    }

    #[test]
    fn test_other_categories_use_keyword_fallback() {
        assert_eq!(classify("What output format?", Clarity), Bucket::Deliverable);
        assert_eq!(classify("Should we skip analytics?", Safety), Bucket::Exclusions);
        assert_eq!(classify("Any accessibility needs?", Completeness), Bucket::Features);
        // scope-only keywords do not apply outside the scope category
        assert_eq!(classify("Which database?", General), Bucket::Features);
    }

    #[test]
    fn test_custom_rule_table() {
        let rules = [Rule {
            category: Some(Safety),
            keywords: &["privacy"],
            bucket: Bucket::Exclusions,
        }];
        assert_eq!(
            classify_with(&rules, "Privacy requirements?", Safety),
            Some(Bucket::Exclusions)
        );
        assert_eq!(classify_with(&rules, "Privacy requirements?", Scope), None);
    }
}
