use serde::{Deserialize, Serialize};

/// Claude message request for the Messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeMessageRequest {
    /// The model to use for generation
    pub model: String,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Input messages
    pub messages: Vec<ClaudeMessage>,
}

/// A message in the Claude conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeMessage {
    /// Role of the message sender
    pub role: ClaudeRole,
    /// Content of the message
    pub content: Vec<ClaudeContentBlock>,
}

/// Role of a Claude message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaudeRole {
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// Content block in a Claude message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClaudeContentBlock {
    /// Text content
    Text { text: String },
}

/// Claude message response from the Messages API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeMessageResponse {
    /// Unique identifier for the response
    #[serde(default)]
    pub id: String,
    /// Role of the response (always "assistant")
    pub role: ClaudeRole,
    /// Model used for generation
    #[serde(default)]
    pub model: String,
    /// Content blocks in the response
    #[serde(default)]
    pub content: Vec<ClaudeContentBlock>,
    /// Reason why generation stopped
    pub stop_reason: Option<String>,
    /// Token usage information
    #[serde(default)]
    pub usage: ClaudeUsage,
}

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaudeUsage {
    /// Number of input tokens
    #[serde(default)]
    pub input_tokens: u32,
    /// Number of output tokens
    #[serde(default)]
    pub output_tokens: u32,
}

/// Claude API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeErrorResponse {
    /// Error details
    pub error: ClaudeError,
}

/// Claude API error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeError {
    /// Error type
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
}

/// Stop reason Claude reports when the `max_tokens` bound cut the output short
pub const STOP_REASON_MAX_TOKENS: &str = "max_tokens";
