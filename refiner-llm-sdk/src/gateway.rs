//! Uniform completion contract over every registered backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    claude::{client::DEFAULT_BASE_URL, types::STOP_REASON_MAX_TOKENS, ClaudeClient},
    client::LlmClient,
    error::{ErrorKind, LlmError},
    providers::Provider,
    types::{CompletionRequest, Usage},
};

/// One single-turn completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayRequest {
    pub provider: String,
    pub model: String,
    pub credentials: String,
    pub user_message: String,
    pub max_tokens: u32,
}

/// Backend-neutral result of a completion call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayCompletion {
    /// Text of the first content block; `None` when the backend sent nothing
    pub text: Option<String>,
    pub usage: Usage,
    /// Set when the backend stopped at its output-length bound
    pub truncated: bool,
    pub model: String,
}

#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, request: GatewayRequest) -> Result<GatewayCompletion, LlmError>;
}

/// Routes requests to the client registered for the requested provider
pub struct ProviderGateway {
    anthropic_base_url: String,
}

impl Default for ProviderGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderGateway {
    pub fn new() -> Self {
        Self {
            anthropic_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the Anthropic client at another host (used by tests)
    pub fn with_anthropic_base_url(mut self, url: impl Into<String>) -> Self {
        self.anthropic_base_url = url.into();
        self
    }

    fn client_for(
        &self,
        provider: Provider,
        credentials: &str,
        model: &str,
    ) -> Result<Box<dyn LlmClient>, LlmError> {
        match provider {
            Provider::Anthropic => Ok(Box::new(
                ClaudeClient::new(credentials)?
                    .with_base_url(&self.anthropic_base_url)
                    .with_model(model),
            )),
            Provider::OpenAi | Provider::Google => Err(LlmError::unsupported_backend(format!(
                "{} support is coming soon. Please use Anthropic (Claude) for now.",
                provider.display_name()
            ))),
        }
    }

    async fn dispatch(
        &self,
        provider: Provider,
        request: GatewayRequest,
    ) -> Result<GatewayCompletion, LlmError> {
        let client = self.client_for(provider, &request.credentials, &request.model)?;
        let completion = CompletionRequest::single_user_message(
            request.model.clone(),
            request.max_tokens,
            request.user_message,
        );

        let response = client.complete(completion).await?;

        Ok(GatewayCompletion {
            text: response
                .first_text()
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            usage: response.usage,
            truncated: response.stop_reason.as_deref() == Some(STOP_REASON_MAX_TOKENS),
            model: request.model,
        })
    }
}

#[async_trait]
impl CompletionGateway for ProviderGateway {
    async fn complete(&self, request: GatewayRequest) -> Result<GatewayCompletion, LlmError> {
        let provider = Provider::from_id(&request.provider)?;
        tracing::info!(provider = %provider, model = %request.model, "Routing completion request");

        self.dispatch(provider, request).await.map_err(|err| {
            tracing::error!(provider = %provider, error = %err, "Provider call failed");
            let prefix = if err.kind() == ErrorKind::Network {
                format!("Failed to connect to {}: ", provider.display_name())
            } else {
                format!("{} API error: ", provider.display_name())
            };
            err.with_context(&prefix)
        })
    }
}
