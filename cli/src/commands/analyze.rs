//! Interactive analyze/answer/regenerate loop

use refiner_core::analysis::types::{AnalysisResult, Question};
use refiner_core::commands::{Command, CommandFailure, CommandResponse};
use refiner_core::options::append_option;
use refiner_core::session::RefinementSession;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use crate::context::AppContext;
use crate::display::{format_analysis, format_question, format_usage, question_options};
use crate::error::{describe_failure, CliError};

/// What the user typed at an answer prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Quit,
    Done,
    Usage,
    ResetUsage,
    Skip,
    Answer(String),
}

/// Interpret one input line. A number picks the matching option and appends
/// it to any answer already given for the question.
pub fn parse_reply(line: &str, options: &[String], existing: &str) -> Reply {
    let line = line.trim();
    match line {
        ":quit" | ":q" => return Reply::Quit,
        ":done" => return Reply::Done,
        ":usage" => return Reply::Usage,
        ":reset-usage" => return Reply::ResetUsage,
        "" => return Reply::Skip,
        _ => {}
    }

    match line.parse::<usize>() {
        Ok(n) if n >= 1 && n <= options.len() => {
            Reply::Answer(append_option(existing, &options[n - 1]))
        }
        _ => Reply::Answer(line.to_string()),
    }
}

struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `None` at end of input
    async fn read(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }

    async fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CliError> {
        let Some(line) = self.read(prompt).await? else {
            return Ok(false);
        };
        Ok(match line.trim().to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

pub async fn run(
    ctx: &AppContext,
    prompt: Option<&str>,
    resume: bool,
    json: bool,
) -> Result<(), CliError> {
    let mut session = ctx.session();

    if resume {
        session.restore().await;
        if session.analysis().is_none() {
            return Err(CliError::Command(
                "No saved session to resume; run `refiner analyze <prompt>`".to_string(),
            ));
        }
    } else {
        let prompt = prompt.ok_or_else(|| {
            CliError::Command("A prompt is required (or pass --resume)".to_string())
        })?;
        println!("Analyzing prompt...");
        session.start(prompt).await?;
    }

    if json {
        if let Some(analysis) = session.analysis() {
            println!("{}", serde_json::to_string_pretty(analysis)?);
        }
        return Ok(());
    }

    interactive(ctx, &mut session).await
}

async fn interactive(ctx: &AppContext, session: &mut RefinementSession) -> Result<(), CliError> {
    let mut input = Input::stdin();

    loop {
        let Some(analysis) = session.analysis().cloned() else {
            return Ok(());
        };
        print_round(&analysis, session.current_prompt());

        if analysis.questions.is_empty() {
            println!("No further questions.");
            return Ok(());
        }

        println!(
            "\nAnswer each question. Enter skips, a number picks an option, \
             :done stops answering, :usage shows tokens, :quit exits.\n"
        );
        if !ask_questions(ctx, session, &mut input, &analysis.questions).await? {
            return Ok(());
        }

        if session.answers().is_empty() {
            println!("No answers given; stopping.");
            return Ok(());
        }
        for (category, open) in session.unanswered() {
            if open > 0 {
                println!("{} unanswered {} question(s)", open, category);
            }
        }

        loop {
            if !input.confirm("Regenerate with these answers? [Y/n] ", true).await? {
                return Ok(());
            }
            println!("Regenerating...");
            match session.regenerate().await {
                Ok(_) => break,
                Err(e) => {
                    let failure = CommandFailure::from(e);
                    eprintln!("{}", describe_failure(&failure));
                    if !input.confirm("Retry? [y/N] ", false).await? {
                        return Err(CliError::Analysis(failure));
                    }
                }
            }
        }
    }
}

/// Returns false when the user asked to quit
async fn ask_questions(
    ctx: &AppContext,
    session: &mut RefinementSession,
    input: &mut Input,
    questions: &[Question],
) -> Result<bool, CliError> {
    for question in questions {
        print!("{}", format_question(question));
        let options = question_options(question);

        loop {
            let existing = session
                .answers()
                .get(&question.id)
                .map(|a| a.answer.clone())
                .unwrap_or_default();
            let prompt = if existing.is_empty() {
                "> ".to_string()
            } else {
                format!("[{}] > ", existing)
            };
            let Some(line) = input.read(&prompt).await? else {
                return Ok(false);
            };

            match parse_reply(&line, &options, &existing) {
                Reply::Quit => return Ok(false),
                Reply::Done => return Ok(true),
                Reply::Skip => break,
                Reply::Usage => print_usage(ctx).await?,
                Reply::ResetUsage => {
                    ctx.handler().handle(Command::ResetTokenUsage).await?;
                    println!("Token usage reset.");
                }
                Reply::Answer(answer) => {
                    debug!(question = question.id, "Recording answer");
                    session.record_answer(question.id, &answer).await;
                    break;
                }
            }
        }
        println!();
    }
    Ok(true)
}

async fn print_usage(ctx: &AppContext) -> Result<(), CliError> {
    if let CommandResponse::TokenUsage(usage) = ctx.handler().handle(Command::GetTokenUsage).await? {
        print!("{}", format_usage(&usage));
    }
    Ok(())
}

fn print_round(analysis: &AnalysisResult, current_prompt: &str) {
    println!();
    if analysis.improved_prompt.is_some() {
        println!("--- Improved prompt ---");
        println!("{}", current_prompt);
        println!("-----------------------\n");
    }
    print!("{}", format_analysis(analysis));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["React".to_string(), "Vue".to_string()]
    }

    #[test]
    fn test_control_words() {
        assert_eq!(parse_reply(":quit", &options(), ""), Reply::Quit);
        assert_eq!(parse_reply(" :done ", &options(), ""), Reply::Done);
        assert_eq!(parse_reply(":usage", &options(), ""), Reply::Usage);
        assert_eq!(parse_reply("", &options(), "React"), Reply::Skip);
    }

    #[test]
    fn test_number_picks_and_appends_option() {
        assert_eq!(parse_reply("2", &options(), ""), Reply::Answer("Vue".into()));
        assert_eq!(
            parse_reply("2", &options(), "React"),
            Reply::Answer("React, Vue".into())
        );
        assert_eq!(parse_reply("1", &options(), "React"), Reply::Answer("React".into()));
    }

    #[test]
    fn test_out_of_range_number_is_free_text() {
        assert_eq!(parse_reply("5", &options(), ""), Reply::Answer("5".into()));
        assert_eq!(parse_reply("0", &[], ""), Reply::Answer("0".into()));
    }
}
