//! Request/response command surface for presentation callers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::analysis::types::{AnalysisResult, TokenUsage};
use crate::analysis::PromptAnalyzer;
use crate::answers::AnswerHistory;
use crate::config::{default_model_for, ConfigFile, Settings};
use crate::error::{AnalysisError, FailureKind};
use crate::storage::PersistedState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    AnalyzePrompt {
        prompt: String,
        #[serde(rename = "previousAnswers", default)]
        previous_answers: AnswerHistory,
    },
    TestApiKey {
        #[serde(rename = "apiKey")]
        api_key: String,
        #[serde(default)]
        model: Option<String>,
    },
    ResetTokenUsage,
    GetTokenUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandResponse {
    Analysis(AnalysisResult),
    ApiKeyValid,
    UsageReset,
    TokenUsage(TokenUsage),
}

/// Structured (kind, message, status) triple; phrasing is left to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFailure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<AnalysisError> for CommandFailure {
    fn from(err: AnalysisError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            status: err.status(),
        }
    }
}

impl std::fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandFailure {}

pub struct CommandHandler {
    analyzer: Arc<PromptAnalyzer>,
    state: PersistedState,
    overrides: Option<ConfigFile>,
}

impl CommandHandler {
    pub fn new(analyzer: Arc<PromptAnalyzer>, state: PersistedState) -> Self {
        Self {
            analyzer,
            state,
            overrides: None,
        }
    }

    pub fn with_overrides(mut self, overrides: Option<ConfigFile>) -> Self {
        self.overrides = overrides;
        self
    }

    async fn settings(&self) -> Result<Settings, AnalysisError> {
        Settings::load(&self.state, self.overrides.as_ref()).await
    }

    pub async fn handle(&self, command: Command) -> Result<CommandResponse, CommandFailure> {
        let kind = command_name(&command);
        tracing::debug!(command = kind, "Handling command");

        let outcome = match command {
            Command::AnalyzePrompt {
                prompt,
                previous_answers,
            } => self.analyze(&prompt, &previous_answers).await,
            Command::TestApiKey { api_key, model } => self.test_api_key(&api_key, model).await,
            Command::ResetTokenUsage => {
                self.analyzer.reset_usage();
                Ok(CommandResponse::UsageReset)
            }
            Command::GetTokenUsage => Ok(self.token_usage().await),
        };

        outcome.map_err(|err| {
            tracing::error!(command = kind, error = %err, "Command failed");
            CommandFailure::from(err)
        })
    }

    async fn analyze(
        &self,
        prompt: &str,
        previous_answers: &AnswerHistory,
    ) -> Result<CommandResponse, AnalysisError> {
        let settings = self.settings().await?;
        let result = self
            .analyzer
            .analyze(&settings, prompt, previous_answers)
            .await?;
        Ok(CommandResponse::Analysis(result))
    }

    async fn test_api_key(
        &self,
        api_key: &str,
        model: Option<String>,
    ) -> Result<CommandResponse, AnalysisError> {
        let provider = match self.settings().await {
            Ok(settings) => settings.provider,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default provider for key test");
                Settings::default().provider
            }
        };
        let model = model.unwrap_or_else(|| default_model_for(&provider).to_string());
        self.analyzer
            .test_credentials(&provider, api_key, &model)
            .await?;
        Ok(CommandResponse::ApiKeyValid)
    }

    async fn token_usage(&self) -> CommandResponse {
        let model = match self.settings().await {
            Ok(settings) => settings.model,
            Err(e) => {
                tracing::warn!(error = %e, "Pricing usage with the default model");
                Settings::default().model
            }
        };
        CommandResponse::TokenUsage(self.analyzer.usage_report(&model))
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::AnalyzePrompt { .. } => "ANALYZE_PROMPT",
        Command::TestApiKey { .. } => "TEST_API_KEY",
        Command::ResetTokenUsage => "RESET_TOKEN_USAGE",
        Command::GetTokenUsage => "GET_TOKEN_USAGE",
    }
}
