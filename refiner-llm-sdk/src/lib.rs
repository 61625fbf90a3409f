//! # Refiner LLM SDK
//!
//! Provider gateway for the prompt refiner: a uniform completion contract
//! over text-completion backends, starting with Claude.
//!
//! ## Example
//!
//! ```rust,no_run
//! use refiner_llm_sdk::gateway::{CompletionGateway, GatewayRequest, ProviderGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = ProviderGateway::new();
//!     let completion = gateway
//!         .complete(GatewayRequest {
//!             provider: "anthropic".into(),
//!             model: "claude-sonnet-4-5-20250929".into(),
//!             credentials: "your-api-key".into(),
//!             user_message: "Hello, Claude!".into(),
//!             max_tokens: 1024,
//!         })
//!         .await?;
//!
//!     println!("Response: {:?}", completion.text);
//!     Ok(())
//! }
//! ```

pub mod claude;
pub mod client;
pub mod error;
pub mod gateway;
pub mod models;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests {
    use crate::claude::{
        client::ClaudeClient,
        types::{ClaudeContentBlock, ClaudeMessage, ClaudeMessageRequest, ClaudeRole},
    };
    use crate::client::LlmClient;

    #[test]
    fn test_claude_client_creation() {
        let client = ClaudeClient::new("test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_claude_client_creation_empty_key() {
        let client = ClaudeClient::new("");
        assert!(client.is_err());
    }

    #[test]
    fn test_claude_client_reports_configured_model() {
        let client = ClaudeClient::new("test-key")
            .unwrap()
            .with_model("claude-haiku-4-5-20251001");
        assert_eq!(client.provider_name(), "anthropic");
        assert_eq!(client.model_name(), "claude-haiku-4-5-20251001");
    }

    #[test]
    fn test_claude_request_wire_shape() {
        let request = ClaudeMessageRequest {
            model: "claude-haiku-4-5-20251001".to_string(),
            max_tokens: 10,
            messages: vec![ClaudeMessage {
                role: ClaudeRole::User,
                content: vec![ClaudeContentBlock::Text {
                    text: "Hi".to_string(),
                }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "model": "claude-haiku-4-5-20251001",
                "max_tokens": 10,
                "messages": [{"role": "user", "content": [{"type": "text", "text": "Hi"}]}]
            })
        );
    }
}
