//! Multi-round refinement workflow backed by persisted state.
//!
//! A session owns the prompt the user started from, the latest analysis, the
//! answers given during the current round and the history accumulated across
//! rounds. Methods that start a round take `&mut self`, so a session can have
//! at most one round in flight.

use std::sync::Arc;

use crate::analysis::types::{AnalysisResult, QuestionCategory};
use crate::analysis::PromptAnalyzer;
use crate::answers::{merge, AnswerHistory, RoundAnswer, RoundAnswers};
use crate::config::{ConfigFile, Settings};
use crate::error::AnalysisError;
use crate::storage::{keys, PersistedState, StorageError};


pub struct RefinementSession {
    analyzer: Arc<PromptAnalyzer>,
    state: PersistedState,
    overrides: Option<ConfigFile>,
    original_prompt: String,
    current_prompt: String,
    analysis: Option<AnalysisResult>,
    round_answers: RoundAnswers,
    history: AnswerHistory,
}

impl RefinementSession {
    pub fn new(analyzer: Arc<PromptAnalyzer>, state: PersistedState) -> Self {
        Self {
            analyzer,
            state,
            overrides: None,
            original_prompt: String::new(),
            current_prompt: String::new(),
            analysis: None,
            round_answers: RoundAnswers::new(),
            history: AnswerHistory::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: Option<ConfigFile>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Reload the last session. Unreadable state falls back to empty values.
    pub async fn restore(&mut self) {
        self.current_prompt = or_default(keys::SAVED_PROMPT, self.state.saved_prompt().await);
        self.original_prompt = or_default(
            keys::SAVED_ORIGINAL_PROMPT,
            self.state.saved_original_prompt().await,
        );
        if self.original_prompt.is_empty() {
            self.original_prompt = self.current_prompt.clone();
        }
        self.analysis = or_default(keys::SAVED_ANALYSIS, self.state.saved_analysis().await);
        self.round_answers = or_default(keys::SAVED_ANSWERS, self.state.saved_answers().await);
        self.history = or_default(
            keys::SAVED_ANSWER_HISTORY,
            self.state.saved_answer_history().await,
        );

        tracing::debug!(
            has_analysis = self.analysis.is_some(),
            history = self.history.len(),
            pending_answers = self.round_answers.len(),
            "Restored session"
        );
    }

    pub fn original_prompt(&self) -> &str {
        &self.original_prompt
    }

    /// Latest improved prompt, or the original prompt before any refinement
    pub fn current_prompt(&self) -> &str {
        &self.current_prompt
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn answers(&self) -> &RoundAnswers {
        &self.round_answers
    }

    pub fn history(&self) -> &AnswerHistory {
        &self.history
    }

    /// Start over from a new prompt and run the first round
    pub async fn start(&mut self, prompt: &str) -> Result<&AnalysisResult, AnalysisError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AnalysisError::EmptyPrompt);
        }

        self.round_answers.clear();
        self.history.clear();
        self.original_prompt = prompt.to_string();
        self.current_prompt = prompt.to_string();
        self.analysis = None;

        let result = self.run_round(&AnswerHistory::new()).await?;

        log_write(keys::SAVED_PROMPT, self.state.set_saved_prompt(prompt).await);
        log_write(
            keys::SAVED_ORIGINAL_PROMPT,
            self.state.set_saved_original_prompt(prompt).await,
        );
        self.persist_round(&result).await;
        Ok(self.analysis.insert(result))
    }

    /// Record (or with blank text, withdraw) the answer to a current question.
    ///
    /// Returns false when the current analysis has no question with that id.
    pub async fn record_answer(&mut self, question_id: u32, text: &str) -> bool {
        let Some(question) = self
            .analysis
            .as_ref()
            .and_then(|analysis| analysis.question(question_id))
        else {
            return false;
        };

        if text.trim().is_empty() {
            self.round_answers.remove(&question_id);
        } else {
            self.round_answers.insert(
                question_id,
                RoundAnswer {
                    question: question.text.clone(),
                    answer: text.trim().to_string(),
                    category: question.category,
                },
            );
        }

        log_write(
            keys::SAVED_ANSWERS,
            self.state.set_saved_answers(&self.round_answers).await,
        );
        true
    }

    /// Question categories of the current round, in first-appearance order
    pub fn categories(&self) -> Vec<QuestionCategory> {
        self.analysis
            .as_ref()
            .map(AnalysisResult::categories)
            .unwrap_or_default()
    }

    /// Unanswered question count per category, in category order
    pub fn unanswered(&self) -> Vec<(QuestionCategory, usize)> {
        let Some(analysis) = &self.analysis else {
            return Vec::new();
        };
        self.categories()
            .into_iter()
            .map(|category| {
                let open = analysis
                    .questions
                    .iter()
                    .filter(|q| q.category == category && !self.round_answers.contains_key(&q.id))
                    .count();
                (category, open)
            })
            .collect()
    }

    /// Fold this round's answers into the history and run the next round.
    ///
    /// On failure the history and pending answers are left as they were so
    /// the caller can retry.
    pub async fn regenerate(&mut self) -> Result<&AnalysisResult, AnalysisError> {
        if self.original_prompt.is_empty() {
            return Err(AnalysisError::EmptyPrompt);
        }
        if !self
            .round_answers
            .values()
            .any(|answer| !answer.answer.trim().is_empty())
        {
            return Err(AnalysisError::NoAnswers);
        }

        let merged = merge(&self.history, &self.round_answers);
        let result = self.run_round(&merged).await?;

        self.history = merged;
        self.round_answers.clear();
        if let Some(improved) = &result.improved_prompt {
            self.current_prompt = improved.clone();
            log_write(keys::SAVED_PROMPT, self.state.set_saved_prompt(improved).await);
        }
        log_write(
            keys::SAVED_ANSWER_HISTORY,
            self.state.set_saved_answer_history(&self.history).await,
        );
        self.persist_round(&result).await;
        Ok(self.analysis.insert(result))
    }

    /// Forget the session, reset token usage and remove saved state
    pub async fn clear(&mut self) {
        self.original_prompt.clear();
        self.current_prompt.clear();
        self.analysis = None;
        self.round_answers.clear();
        self.history.clear();
        self.analyzer.reset_usage();
        log_write("session", self.state.clear_session().await);
    }

    async fn run_round(&self, history: &AnswerHistory) -> Result<AnalysisResult, AnalysisError> {
        let settings = Settings::load(&self.state, self.overrides.as_ref()).await?;
        self.analyzer
            .analyze(&settings, &self.original_prompt, history)
            .await
    }

    async fn persist_round(&self, result: &AnalysisResult) {
        log_write(keys::SAVED_ANALYSIS, self.state.set_saved_analysis(result).await);
        log_write(
            keys::SAVED_ANSWERS,
            self.state.set_saved_answers(&self.round_answers).await,
        );
        log_write(
            keys::SAVED_QUALITY_SCORE,
            self.state.set_saved_quality_score(result.quality_score).await,
        );
    }
}

fn log_write(key: &str, result: Result<(), StorageError>) {
    if let Err(e) = result {
        tracing::warn!(key, error = %e, "Failed to persist session state");
    }
}

fn or_default<T: Default>(key: &str, result: Result<T, StorageError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "Failed to read session state");
        T::default()
    })
}
