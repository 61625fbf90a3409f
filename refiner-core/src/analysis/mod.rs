//! Analysis Orchestrator: one round of prompt critique.

use refiner_llm_sdk::gateway::{CompletionGateway, GatewayRequest};
use std::sync::Arc;

use crate::answers::{AnswerHistory, BucketedAnswers};
use crate::config::{AnalyzerOptions, Settings};
use crate::error::AnalysisError;
use crate::pricing;
use crate::synthesis::synthesize;
use crate::usage::SessionUsage;

pub mod extract;
pub mod prompts;
pub mod types;


use prompts::{RoundPayload, CREDENTIAL_TEST_MESSAGE};
use types::{AnalysisResult, TokenUsage};

pub struct PromptAnalyzer {
    gateway: Arc<dyn CompletionGateway>,
    usage: Arc<SessionUsage>,
    options: AnalyzerOptions,
}

impl PromptAnalyzer {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            gateway,
            usage: Arc::new(SessionUsage::new()),
            options: AnalyzerOptions::default(),
        }
    }

    /// Share session counters with another owner
    pub fn with_usage(mut self, usage: Arc<SessionUsage>) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn usage(&self) -> &Arc<SessionUsage> {
        &self.usage
    }

    /// Run one round for `prompt` with the accumulated answer history.
    ///
    /// Session usage is incremented as soon as the backend replies, before the
    /// reply is validated. The backend's `improvedPrompt` is never trusted: it
    /// is `None` on the first round and the synthesized prompt afterwards.
    pub async fn analyze(
        &self,
        settings: &Settings,
        prompt: &str,
        history: &AnswerHistory,
    ) -> Result<AnalysisResult, AnalysisError> {
        if prompt.trim().is_empty() {
            return Err(AnalysisError::EmptyPrompt);
        }
        let credentials = settings.require_api_key()?;
        let payload = RoundPayload::build(prompt, history);

        tracing::info!(
            provider = %settings.provider,
            model = %settings.model,
            first_round = payload.first_round,
            answers = history.len(),
            "Analyzing prompt"
        );

        let completion = self
            .gateway
            .complete(GatewayRequest {
                provider: settings.provider.clone(),
                model: settings.model.clone(),
                credentials: credentials.to_string(),
                user_message: payload.user_message(),
                max_tokens: self.options.max_tokens,
            })
            .await?;

        let input_tokens = u64::from(completion.usage.input_tokens);
        let output_tokens = u64::from(completion.usage.output_tokens);
        self.usage.increment(input_tokens, output_tokens);
        tracing::info!(input_tokens, output_tokens, "Round token usage");

        if completion.truncated {
            tracing::warn!(
                max_tokens = self.options.max_tokens,
                "Response was truncated at the output token limit"
            );
        }

        let text = completion.text.ok_or(AnalysisError::EmptyResponse)?;
        let backend = extract::parse_analysis(&text)?;
        let quality_score = backend.clamped_quality_score();
        if let Some(rewrite) = backend.improved_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            tracing::debug!(chars = rewrite.len(), "Discarding backend improvedPrompt");
        }

        let improved_prompt = if payload.first_round {
            None
        } else {
            let buckets = BucketedAnswers::from_history(history);
            tracing::debug!(answers = history.len(), "Synthesizing improved prompt");
            Some(synthesize(prompt, &buckets))
        };

        Ok(AnalysisResult {
            questions: backend.questions,
            risk_level: backend.risk_level,
            summary: backend.summary,
            quality_score,
            improved_prompt,
            token_usage: self.usage_report(&settings.model),
        })
    }

    /// Minimal completion call that only reports whether the credential works.
    /// Does not count toward session usage.
    pub async fn test_credentials(
        &self,
        provider: &str,
        credentials: &str,
        model: &str,
    ) -> Result<(), AnalysisError> {
        if credentials.trim().is_empty() {
            return Err(AnalysisError::MissingCredentials);
        }
        tracing::info!(provider, model, "Testing API key");

        self.gateway
            .complete(GatewayRequest {
                provider: provider.to_string(),
                model: model.to_string(),
                credentials: credentials.trim().to_string(),
                user_message: CREDENTIAL_TEST_MESSAGE.to_string(),
                max_tokens: self.options.credential_test_max_tokens,
            })
            .await?;
        Ok(())
    }

    /// Session totals with the cost estimated for `model`
    pub fn usage_report(&self, model: &str) -> TokenUsage {
        let snapshot = self.usage.read();
        TokenUsage {
            input_tokens: snapshot.input_tokens,
            output_tokens: snapshot.output_tokens,
            total_tokens: snapshot.total_tokens(),
            cost: pricing::snapshot_cost(model, snapshot),
        }
    }

    pub fn reset_usage(&self) {
        tracing::info!("Resetting session token usage");
        self.usage.reset();
    }
}
