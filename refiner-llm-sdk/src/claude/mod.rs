//! Claude (Anthropic) LLM client implementation

pub mod client;
pub mod types;

pub use client::ClaudeClient;
