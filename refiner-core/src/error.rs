use refiner_llm_sdk::error::{ErrorKind, LlmError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("Received empty response from AI provider")]
    EmptyResponse,

    /// `raw` is kept for diagnostics and must not be shown to users
    #[error("Received invalid JSON from AI. Please try again.")]
    InvalidJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No API key found. Please configure your API key in settings.")]
    MissingCredentials,

    #[error("Please enter a prompt to analyze")]
    EmptyPrompt,

    #[error("Answer at least one question before regenerating")]
    NoAnswers,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Serializable classification across provider and analysis failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Auth,
    RateLimit,
    BadRequest,
    Server,
    Api,
    Network,
    UnsupportedBackend,
    EmptyResponse,
    InvalidJson,
    MissingCredentials,
    InvalidInput,
    Storage,
    Config,
    Internal,
}

impl From<ErrorKind> for FailureKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Auth => FailureKind::Auth,
            ErrorKind::RateLimit => FailureKind::RateLimit,
            ErrorKind::BadRequest => FailureKind::BadRequest,
            ErrorKind::Server => FailureKind::Server,
            ErrorKind::Api => FailureKind::Api,
            ErrorKind::Network => FailureKind::Network,
            ErrorKind::UnsupportedBackend => FailureKind::UnsupportedBackend,
            ErrorKind::Parse | ErrorKind::Internal => FailureKind::Internal,
        }
    }
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AnalysisError::Provider(err) => err.kind().into(),
            AnalysisError::EmptyResponse => FailureKind::EmptyResponse,
            AnalysisError::InvalidJson { .. } => FailureKind::InvalidJson,
            AnalysisError::MissingCredentials => FailureKind::MissingCredentials,
            AnalysisError::EmptyPrompt | AnalysisError::NoAnswers => FailureKind::InvalidInput,
            AnalysisError::Storage(_) => FailureKind::Storage,
            AnalysisError::Config(_) => FailureKind::Config,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Provider(err) => err.status(),
            _ => None,
        }
    }
}
