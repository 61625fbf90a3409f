//! # Refiner Core
//!
//! Multi-round prompt refinement: each round sends the prompt (and any answers
//! collected so far) to a completion backend for critique, then rebuilds an
//! improved prompt from the accumulated answers.
//!
//! ```rust,no_run
//! use refiner_core::{
//!     analysis::PromptAnalyzer, session::RefinementSession,
//!     storage::{JsonFileStore, PersistedState},
//! };
//! use refiner_llm_sdk::gateway::ProviderGateway;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), refiner_core::error::AnalysisError> {
//! let state = PersistedState::new(Arc::new(JsonFileStore::new("state.json")));
//! let analyzer = Arc::new(PromptAnalyzer::new(Arc::new(ProviderGateway::new())));
//! let mut session = RefinementSession::new(analyzer, state);
//!
//! let first = session.start("Build me a website").await?;
//! println!("quality {}/10", first.quality_score);
//!
//! session.record_answer(1, "portfolio").await;
//! let second = session.regenerate().await?;
//! println!("{}", second.improved_prompt.as_deref().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod answers;
pub mod commands;
pub mod config;
pub mod error;
pub mod options;
pub mod pricing;
pub mod session;
pub mod storage;
pub mod synthesis;
pub mod text;
pub mod usage;

#[cfg(test)]
mod test_support;

pub use analysis::types::{AnalysisResult, Question, QuestionCategory, RiskLevel, TokenUsage};
pub use analysis::PromptAnalyzer;
pub use error::{AnalysisError, FailureKind};
