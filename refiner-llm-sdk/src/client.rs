use crate::{
    error::LlmError,
    types::{CompletionRequest, CompletionResponse},
};
use async_trait::async_trait;

/// Core trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete a request (non-streaming)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Get provider name (e.g., "anthropic")
    fn provider_name(&self) -> &str;

    /// Get model name (e.g., "claude-sonnet-4-5-20250929")
    fn model_name(&self) -> &str;
}
