//! Outbound request text for an analysis round.

use crate::answers::AnswerHistory;

/// Fixed analyzer instructions prepended to every round
pub const ANALYSIS_INSTRUCTIONS: &str = r#"You are an intelligent prompt quality analyzer. Your goal is to identify the most CRITICAL gaps that would block someone from understanding or implementing this prompt.

ADAPTIVE QUESTIONING APPROACH:

Golden Rule: "Would a colleague with minimal context understand this prompt and be able to act on it?"

ANALYZE THE PROMPT:
Identify what's missing by considering these areas (but don't ask about all — only what's critically unclear):
- Clarity: Are there ambiguous terms? Would someone unfamiliar with the context understand?
- Context: Who is this for? Why does it matter? What's the background or motivation?
- Scope: What specifically needs to be done? What are the actual requirements?
- Constraints: What should be avoided? What are the limitations (time, budget, technical)?

QUESTION GENERATION RULES:
1. Generate 2-4 questions maximum (focus on highest impact gaps)
2. Prioritize by impact — most critical questions first
3. Each question asks about ONE thing only (no compound questions)
4. Skip questions where the answer is obvious from context
5. Include a brief explanation of WHY each question matters
6. Provide 3-4 example answers as suggestions for each question

EXAMPLE OPTION FORMAT:
- Use pipe '|' to separate options, NOT commas
- Each option must be complete and self-contained
- For numbers, write without commas (use "5000" not "5,000")
- Examples: "Static website | Blog with CMS | E-commerce store | SaaS application"
- Examples: "Under $500 | $500 to $2000 | $2000 to $5000 | Above $5000"

QUALITY SCORE GUIDELINES:
- 8-10: Prompt is clear enough to start building
- 5-7: Some important details missing
- 1-4: Critical information missing that would block implementation

IMPROVED PROMPT RULES:
- If this is FIRST analysis (no "Context from previous questions:"): set "improvedPrompt" to null
- If context exists: Generate an improved prompt incorporating ALL answers
  - Write it as if the user wrote it themselves
  - Use clear, specific language
  - Group into logical sections (Requirements, Constraints, Technical Details)
  - Do NOT include Q&A format or placeholders

Return JSON in this EXACT structure:
{
  "questions": [
    {
      "id": 1,
      "question": "Your question (ONE thing only)",
      "explanation": "Why this matters for implementation",
      "example": "Option 1 | Option 2 | Option 3 | Option 4",
      "category": "clarity|scope|context",
      "suggestions": [
        {
          "option": "Specific choice",
          "explanation": "Detailed pros/cons/implications",
          "recommended": true
        }
      ]
    }
  ],
  "riskLevel": "low|medium|high",
  "summary": "What is clear + what critical gaps remain",
  "qualityScore": 1-10,
  "improvedPrompt": null or "Enhanced prompt with ALL answers"
}

IMPORTANT: Return ONLY valid JSON, no additional text."#;

/// Minimal message used to check a credential
pub const CREDENTIAL_TEST_MESSAGE: &str = "Hi";

/// Prompt text for one round, plus whether it is the first round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPayload {
    pub text: String,
    pub first_round: bool,
}

impl RoundPayload {
    /// Serialize answered history entries as `Q:`/`A:` blocks after the prompt.
    ///
    /// Entries with blank answers are skipped; with none left the payload is
    /// the bare prompt and the round counts as the first.
    pub fn build(prompt: &str, history: &AnswerHistory) -> Self {
        let answered: Vec<String> = history
            .iter()
            .filter(|(_, record)| !record.answer_text.trim().is_empty())
            .map(|(question, record)| format!("Q: {}\nA: {}", question, record.answer_text))
            .collect();

        if answered.is_empty() {
            return Self {
                text: prompt.to_string(),
                first_round: true,
            };
        }

        Self {
            text: format!(
                "Original prompt:\n{}\n\nContext from previous questions:\n{}",
                prompt,
                answered.join("\n\n")
            ),
            first_round: false,
        }
    }

    /// Full single user message sent to the backend
    pub fn user_message(&self) -> String {
        format!(
            "{}\n\nPrompt to analyze:\n{}",
            ANALYSIS_INSTRUCTIONS, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::QuestionCategory;
    use crate::answers::AnswerRecord;

    #[test]
    fn test_first_round_is_bare_prompt() {
        let payload = RoundPayload::build("Build a CRM", &AnswerHistory::new());
        assert!(payload.first_round);
        assert_eq!(payload.text, "Build a CRM");
        assert!(payload
            .user_message()
            .ends_with("no additional text.\n\nPrompt to analyze:\nBuild a CRM"));
    }

    #[test]
    fn test_blank_answers_do_not_count() {
        let mut history = AnswerHistory::new();
        history.insert("Budget?".into(), AnswerRecord::new("  ", QuestionCategory::Context));
        assert!(RoundPayload::build("Build a CRM", &history).first_round);
    }

    #[test]
    fn test_answers_are_serialized_as_blocks() {
        let mut history = AnswerHistory::new();
        history.insert("Budget?".into(), AnswerRecord::new("Low", QuestionCategory::Context));
        history.insert("Audience?".into(), AnswerRecord::new("Sales", QuestionCategory::Context));
        history.insert("Timeline?".into(), AnswerRecord::new("", QuestionCategory::Context));

        let payload = RoundPayload::build("Build a CRM", &history);
        assert!(!payload.first_round);
        assert_eq!(
            payload.text,
            "Original prompt:\nBuild a CRM\n\nContext from previous questions:\n\
             Q: Audience?\nA: Sales\n\nQ: Budget?\nA: Low"
        );
    }

    #[test]
    fn test_instructions_describe_json_contract() {
        assert!(ANALYSIS_INSTRUCTIONS.starts_with("You are an intelligent prompt quality analyzer."));
        assert!(ANALYSIS_INSTRUCTIONS.contains("\"improvedPrompt\": null"));
    }
}
