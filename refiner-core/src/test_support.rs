use async_trait::async_trait;
use refiner_llm_sdk::error::LlmError;
use refiner_llm_sdk::gateway::{CompletionGateway, GatewayCompletion, GatewayRequest};
use refiner_llm_sdk::types::Usage;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::config::Settings;

/// Gateway that replays queued replies and records every request
#[derive(Default)]
pub struct MockGateway {
    replies: Mutex<VecDeque<Result<GatewayCompletion, LlmError>>>,
    pub requests: Mutex<Vec<GatewayRequest>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_text(self, text: &str) -> Self {
        self.reply(Ok(completion(Some(text), 100, 50, false)))
    }

    pub fn reply(self, reply: Result<GatewayCompletion, LlmError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> GatewayRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl CompletionGateway for MockGateway {
    async fn complete(&self, request: GatewayRequest) -> Result<GatewayCompletion, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::internal("no reply queued")))
    }
}

pub fn completion(
    text: Option<&str>,
    input_tokens: u32,
    output_tokens: u32,
    truncated: bool,
) -> GatewayCompletion {
    GatewayCompletion {
        text: text.map(str::to_string),
        usage: Usage {
            input_tokens,
            output_tokens,
        },
        truncated,
        model: "claude-sonnet-4-5-20250929".to_string(),
    }
}

pub fn settings() -> Settings {
    Settings {
        api_key: Some("sk-ant-test".to_string()),
        ..Settings::default()
    }
}

/// A backend reply with two questions
pub fn analysis_json(improved_prompt: &str) -> String {
    serde_json::json!({
        "questions": [
            {
                "id": 1,
                "question": "What type of app?",
                "explanation": "Sets the overall shape",
                "example": "Task manager | CRM | Blog",
                "category": "scope",
                "suggestions": [
                    {"option": "Task manager", "explanation": "Simple", "recommended": true}
                ]
            },
            {
                "id": 2,
                "question": "What is your timeline?",
                "explanation": "Drives scope",
                "example": "1 week | 1 month",
                "category": "context",
                "suggestions": []
            }
        ],
        "riskLevel": "medium",
        "summary": "Purpose is unclear",
        "qualityScore": 4,
        "improvedPrompt": improved_prompt
    })
    .to_string()
}
