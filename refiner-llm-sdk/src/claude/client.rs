use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::{
    claude::types::{
        ClaudeContentBlock, ClaudeErrorResponse, ClaudeMessage, ClaudeMessageRequest,
        ClaudeMessageResponse, ClaudeRole,
    },
    error::LlmError,
    types::{CompletionRequest, CompletionResponse, ContentBlock, Role, Usage},
};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const API_VERSION: &str = "2023-06-01";

/// Claude (Anthropic) LLM client
pub struct ClaudeClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl ClaudeClient {
    /// Create a new Claude client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        // No explicit timeout: the transport default applies to every round.
        let http_client = reqwest::Client::builder().build()?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: crate::models::claude::SONNET_4_5_ID.to_string(),
            http_client,
        })
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model reported by [`LlmClient::model_name`]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create a message using the Claude Messages API
    pub async fn create_message(
        &self,
        request: ClaudeMessageRequest,
    ) -> Result<ClaudeMessageResponse, LlmError> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|_| LlmError::authentication("Invalid API key format"))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(model = %request.model, max_tokens = request.max_tokens, "Sending Claude request");

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let claude_response: ClaudeMessageResponse = response
                .json()
                .await
                .map_err(|e| LlmError::internal(format!("Failed to parse response: {}", e)))?;
            Ok(claude_response)
        } else {
            // Get retry-after header before consuming the response
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());

            let error_text = response.text().await.unwrap_or_default();

            Err(status_error(status.as_u16(), &error_text, retry_after))
        }
    }
}

/// Map a non-success HTTP status and body onto the error taxonomy
pub(crate) fn status_error(status: u16, body: &str, retry_after: Option<u64>) -> LlmError {
    let payload_message = serde_json::from_str::<ClaudeErrorResponse>(body)
        .ok()
        .map(|e| e.error.message)
        .filter(|m| !m.trim().is_empty());

    match status {
        401 => LlmError::unauthorized(401, "Invalid API key"),
        429 => LlmError::rate_limit("Rate limit exceeded", retry_after),
        400 => LlmError::invalid_request(payload_message.unwrap_or_else(|| "Bad request".into())),
        s if s >= 500 => LlmError::server(s, "Anthropic server error"),
        s => LlmError::api_error(
            s,
            payload_message.unwrap_or_else(|| "API request failed".into()),
        ),
    }
}

#[async_trait]
impl crate::client::LlmClient for ClaudeClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let messages = request
            .messages
            .into_iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::User => ClaudeRole::User,
                    Role::Assistant => ClaudeRole::Assistant,
                };
                let content = msg
                    .content
                    .into_iter()
                    .map(|block| match block {
                        ContentBlock::Text { text } => ClaudeContentBlock::Text { text },
                    })
                    .collect();
                ClaudeMessage { role, content }
            })
            .collect();

        let claude_request = ClaudeMessageRequest {
            model: request.model,
            max_tokens: request.max_tokens,
            messages,
        };

        let claude_response = self.create_message(claude_request).await?;

        let content = claude_response
            .content
            .into_iter()
            .map(|block| match block {
                ClaudeContentBlock::Text { text } => ContentBlock::Text { text },
            })
            .collect();

        Ok(CompletionResponse {
            content,
            role: match claude_response.role {
                ClaudeRole::User => Role::User,
                ClaudeRole::Assistant => Role::Assistant,
            },
            usage: Usage {
                input_tokens: claude_response.usage.input_tokens,
                output_tokens: claude_response.usage.output_tokens,
            },
            stop_reason: claude_response.stop_reason,
        })
    }

    fn provider_name(&self) -> &str {
        crate::providers::ANTHROPIC
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
