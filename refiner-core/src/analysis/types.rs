use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::options::{parse_example_options, ExampleOptions};

/// Category tag the backend attaches to each question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionCategory {
    Clarity,
    Scope,
    Context,
    Safety,
    Completeness,
    #[default]
    General,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Clarity => "clarity",
            QuestionCategory::Scope => "scope",
            QuestionCategory::Context => "context",
            QuestionCategory::Safety => "safety",
            QuestionCategory::Completeness => "completeness",
            QuestionCategory::General => "general",
        }
    }

    /// Case-insensitive parse; anything unrecognized is `General`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "clarity" => QuestionCategory::Clarity,
            "scope" => QuestionCategory::Scope,
            "context" => QuestionCategory::Context,
            "safety" => QuestionCategory::Safety,
            "completeness" => QuestionCategory::Completeness,
            _ => QuestionCategory::General,
        }
    }
}

impl From<String> for QuestionCategory {
    fn from(s: String) -> Self {
        QuestionCategory::parse(&s)
    }
}

impl From<QuestionCategory> for String {
    fn from(category: QuestionCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Backend replies are loosely typed: explicit nulls mean "absent" and
// numbers sometimes arrive as strings.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match numeric(&value) {
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => Ok(n as u32),
        _ => Err(de::Error::custom(format!("invalid question id: {}", value))),
    }
}

/// Unparseable scores become `None` and fall back to the default score
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(numeric(&Value::deserialize(deserializer)?))
}

/// A suggested answer for a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub option: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended: bool,
}

/// A clarifying question. `id` is only meaningful within its own round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "lenient_id")]
    pub id: u32,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
    /// Raw example text, possibly a label plus delimited options
    #[serde(rename = "example", default, deserialize_with = "null_as_default")]
    pub example_spec: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: QuestionCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<Suggestion>,
}

impl Question {
    pub fn example_options(&self) -> ExampleOptions {
        parse_example_options(&self.example_spec)
    }
}

/// Session token totals and their estimated cost
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    /// Estimated USD cost
    pub cost: f64,
}

/// One round's critique, as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub questions: Vec<Question>,
    pub risk_level: RiskLevel,
    pub summary: String,
    /// Always within 1..=10
    pub quality_score: u8,
    pub improved_prompt: Option<String>,
    pub token_usage: TokenUsage,
}

impl AnalysisResult {
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Question categories in order of first appearance
    pub fn categories(&self) -> Vec<QuestionCategory> {
        let mut seen = Vec::new();
        for question in &self.questions {
            if !seen.contains(&question.category) {
                seen.push(question.category);
            }
        }
        seen
    }
}

/// The JSON document the backend is instructed to return
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BackendAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_level: RiskLevel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub improved_prompt: Option<String>,
}

pub(crate) const DEFAULT_QUALITY_SCORE: u8 = 5;

impl BackendAnalysis {
    pub fn clamped_quality_score(&self) -> u8 {
        match self.quality_score {
            Some(score) if score.is_finite() => score.round().clamp(1.0, 10.0) as u8,
            _ => DEFAULT_QUALITY_SCORE,
        }
    }
}
