//! Deterministic rendering of bucketed answers into a sectioned prompt.

use serde::Serialize;

use crate::answers::BucketedAnswers;
use crate::text::split_respecting_parentheses;

const CONTEXT_FALLBACK: &str = "Building a custom solution based on the specified requirements.";
const TASK_FALLBACK: &str = "Implement the following requirements:";
const DEFAULT_DELIVERABLES: &[&str] = &[
    "Working application with setup instructions",
    "README with deployment guide",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Context,
    Task,
    Requirements,
    Constraints,
    TechnicalContext,
    OutputSpecification,
    ScopeBoundaries,
}

impl SectionName {
    /// Tag wrapping the section; `None` for the plain technical context block
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            SectionName::Context => Some("context"),
            SectionName::Task => Some("task"),
            SectionName::Requirements => Some("requirements"),
            SectionName::Constraints => Some("constraints"),
            SectionName::TechnicalContext => None,
            SectionName::OutputSpecification => Some("output_specification"),
            SectionName::ScopeBoundaries => Some("scope_boundaries"),
        }
    }
}

/// Ordered sections of a synthesized prompt, each a list of rendered lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSections {
    sections: Vec<(SectionName, Vec<String>)>,
}

impl PromptSections {
    pub fn build(original_prompt: &str, answers: &BucketedAnswers) -> Self {
        let prompt = original_prompt.trim();
        let mut sections = vec![
            (SectionName::Context, vec![context_sentence(prompt, answers)]),
            (SectionName::Task, vec![opening_sentence(prompt, answers)]),
        ];

        let requirements = bullet_items(answers.requirements());
        if !requirements.is_empty() {
            sections.push((SectionName::Requirements, requirements));
        }

        let mut constraints = Vec::new();
        if !answers.timeline.is_empty() {
            constraints.push(format!("- Timeline: {}", answers.timeline.join(", ")));
        }
        if !answers.budget.is_empty() {
            constraints.push(format!("- Budget: {}", answers.budget.join(", ")));
        }
        if !constraints.is_empty() {
            sections.push((SectionName::Constraints, constraints));
        }

        if !answers.tech_stack.is_empty() {
            sections.push((SectionName::TechnicalContext, bullets(&answers.tech_stack)));
        }

        let deliverables = if answers.deliverable.is_empty() {
            DEFAULT_DELIVERABLES.iter().map(|d| format!("- {}", d)).collect()
        } else {
            bullets(&answers.deliverable)
        };
        sections.push((SectionName::OutputSpecification, deliverables));

        let exclusions = bullet_items(answers.exclusions.iter());
        if !exclusions.is_empty() {
            sections.push((SectionName::ScopeBoundaries, exclusions));
        }

        Self { sections }
    }

    pub fn get(&self, name: SectionName) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|(section, _)| *section == name)
            .map(|(_, lines)| lines.as_slice())
    }

    pub fn names(&self) -> Vec<SectionName> {
        self.sections.iter().map(|(name, _)| *name).collect()
    }

    /// Flatten to text: sections separated by one blank line, no trailing newline
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(|(name, lines)| match name.tag() {
                Some(tag) => format!("<{tag}>\n{}\n</{tag}>", lines.join("\n")),
                None => format!("Technical Context:\n{}", lines.join("\n")),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Build the improved prompt for the original prompt and bucketed answers
pub fn synthesize(original_prompt: &str, answers: &BucketedAnswers) -> String {
    PromptSections::build(original_prompt, answers).render()
}

fn build_sentence(answers: &BucketedAnswers) -> Option<String> {
    let purpose = answers.purpose.as_deref()?;
    Some(match answers.audience.as_deref() {
        Some(audience) => format!("Build a {} for {}.", purpose, audience),
        None => format!("Build a {}.", purpose),
    })
}

fn context_sentence(prompt: &str, answers: &BucketedAnswers) -> String {
    if let Some(sentence) = build_sentence(answers) {
        return sentence;
    }
    if let Some(audience) = answers.audience.as_deref() {
        return format!("Developing a solution for {}.", audience);
    }
    if !prompt.is_empty() {
        return prompt.to_string();
    }
    CONTEXT_FALLBACK.to_string()
}

fn opening_sentence(prompt: &str, answers: &BucketedAnswers) -> String {
    if let Some(sentence) = build_sentence(answers) {
        return sentence;
    }
    let first = prompt.split('.').next().unwrap_or_default().trim();
    if first.is_empty() {
        TASK_FALLBACK.to_string()
    } else {
        format!("{}.", first)
    }
}

fn bullets(items: &[String]) -> Vec<String> {
    items.iter().map(|item| format!("- {}", item)).collect()
}

/// One bullet per comma-separated item, keeping parenthesized commas intact
fn bullet_items<'a>(entries: impl Iterator<Item = &'a String>) -> Vec<String> {
    entries
        .flat_map(|entry| {
            if entry.contains(',') {
                split_respecting_parentheses(entry)
            } else {
                vec![entry.clone()]
            }
        })
        .map(|item| format!("- {}", item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> BucketedAnswers {
        BucketedAnswers::default()
    }

    #[test]
    fn test_purpose_and_audience_lead() {
        let mut a = answers();
        a.purpose = Some("task manager".into());
        a.audience = Some("small teams".into());

        let text = synthesize("Make me an app.", &a);
        assert!(text.starts_with(
            "<context>\nBuild a task manager for small teams.\n</context>\n\n<task>\nBuild a task manager for small teams.\n</task>"
        ));
    }

    #[test]
    fn test_fallbacks_without_answers() {
        let text = synthesize("Create a landing page. Make it fast.", &answers());
        assert_eq!(
            text,
            "<context>\nCreate a landing page. Make it fast.\n</context>\n\n\
             <task>\nCreate a landing page.\n</task>\n\n\
             <output_specification>\n\
             - Working application with setup instructions\n\
             - README with deployment guide\n\
             </output_specification>"
        );
    }

    #[test]
    fn test_empty_prompt_uses_generic_sentences() {
        let sections = PromptSections::build("  ", &answers());
        assert_eq!(sections.get(SectionName::Context).unwrap(), [CONTEXT_FALLBACK]);
        assert_eq!(sections.get(SectionName::Task).unwrap(), [TASK_FALLBACK]);
    }

    #[test]
    fn test_audience_only_context() {
        let mut a = answers();
        a.audience = Some("nurses".into());
        let sections = PromptSections::build("Shift planner", &a);
        assert_eq!(
            sections.get(SectionName::Context).unwrap(),
            ["Developing a solution for nurses."]
        );
        assert_eq!(sections.get(SectionName::Task).unwrap(), ["Shift planner."]);
    }

    #[test]
    fn test_full_document() {
        let mut a = answers();
        a.purpose = Some("booking site".into());
        a.features = vec!["Calendar view, reminders (email, SMS)".into()];
        a.integrations = vec!["Stripe".into()];
        a.auth = vec!["Google login".into()];
        a.data = vec!["Postgres".into()];
        a.timeline = vec!["2 weeks".into(), "MVP first".into()];
        a.budget = vec!["Under $500".into()];
        a.tech_stack = vec!["Rust".into(), "React".into()];
        a.deliverable = vec!["Deployed site".into()];
        a.exclusions = vec!["Mobile app, admin panel".into()];

        let expected = "\
<context>
Build a booking site.
</context>

<task>
Build a booking site.
</task>

<requirements>
- Calendar view
- reminders (email, SMS)
- Stripe
- Google login
- Postgres
</requirements>

<constraints>
- Timeline: 2 weeks, MVP first
- Budget: Under $500
</constraints>

Technical Context:
- Rust
- React

<output_specification>
- Deployed site
</output_specification>

<scope_boundaries>
- Mobile app
- admin panel
</scope_boundaries>";

        assert_eq!(synthesize("ignored when purpose is set", &a), expected);
    }

    #[test]
    fn test_sections_omitted_when_empty() {
        let mut a = answers();
        a.budget = vec!["Flexible".into()];
        let sections = PromptSections::build("Build a CRM", &a);
        assert_eq!(
            sections.names(),
            vec![
                SectionName::Context,
                SectionName::Task,
                SectionName::Constraints,
                SectionName::OutputSpecification,
            ]
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let mut a = answers();
        a.purpose = Some("blog".into());
        a.features = vec!["comments, tags".into()];
        assert_eq!(synthesize("x", &a), synthesize("x", &a));
    }
}
