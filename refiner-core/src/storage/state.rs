use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use super::{KeyValueStore, StorageError};
use crate::analysis::types::AnalysisResult;
use crate::answers::{AnswerHistory, RoundAnswers};

pub mod keys {
    pub const PROVIDER: &str = "provider";
    pub const MODEL: &str = "model";
    pub const API_KEY: &str = "apiKey";
    /// Read as a fallback for `apiKey`, never written
    pub const LEGACY_API_KEY: &str = "anthropicApiKey";
    pub const SAVED_PROMPT: &str = "savedPrompt";
    pub const SAVED_ORIGINAL_PROMPT: &str = "savedOriginalPrompt";
    pub const SAVED_ANALYSIS: &str = "savedAnalysis";
    pub const SAVED_ANSWERS: &str = "savedAnswers";
    pub const SAVED_ANSWER_HISTORY: &str = "savedAnswerHistory";
    pub const SAVED_QUALITY_SCORE: &str = "savedQualityScore";

    /// Keys holding session state, as opposed to settings
    pub const SESSION: &[&str] = &[
        SAVED_PROMPT,
        SAVED_ORIGINAL_PROMPT,
        SAVED_ANALYSIS,
        SAVED_ANSWERS,
        SAVED_ANSWER_HISTORY,
        SAVED_QUALITY_SCORE,
    ];
}

/// Typed view over a [`KeyValueStore`].
///
/// Every getter tolerates an absent key: strings and maps default to empty,
/// the analysis and score to `None`. A value that no longer deserializes is
/// logged and treated as absent.
#[derive(Clone)]
pub struct PersistedState {
    store: Arc<dyn KeyValueStore>,
}

impl PersistedState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }
        match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring unreadable stored value");
                Ok(None)
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        self.store.set(key, serde_json::to_value(value)?).await
    }

    async fn read_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .read::<String>(key)
            .await?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    pub async fn provider(&self) -> Result<Option<String>, StorageError> {
        self.read_string(keys::PROVIDER).await
    }

    pub async fn set_provider(&self, provider: &str) -> Result<(), StorageError> {
        self.write(keys::PROVIDER, provider).await
    }

    pub async fn model(&self) -> Result<Option<String>, StorageError> {
        self.read_string(keys::MODEL).await
    }

    pub async fn set_model(&self, model: &str) -> Result<(), StorageError> {
        self.write(keys::MODEL, model).await
    }

    /// Stored credential, falling back to the legacy key
    pub async fn api_key(&self) -> Result<Option<String>, StorageError> {
        match self.read_string(keys::API_KEY).await? {
            Some(key) => Ok(Some(key)),
            None => self.read_string(keys::LEGACY_API_KEY).await,
        }
    }

    pub async fn set_api_key(&self, api_key: &str) -> Result<(), StorageError> {
        self.write(keys::API_KEY, api_key.trim()).await
    }

    pub async fn saved_prompt(&self) -> Result<String, StorageError> {
        Ok(self.read(keys::SAVED_PROMPT).await?.unwrap_or_default())
    }

    pub async fn set_saved_prompt(&self, prompt: &str) -> Result<(), StorageError> {
        self.write(keys::SAVED_PROMPT, prompt).await
    }

    /// Prompt the current session started from; empty when never saved
    pub async fn saved_original_prompt(&self) -> Result<String, StorageError> {
        Ok(self.read(keys::SAVED_ORIGINAL_PROMPT).await?.unwrap_or_default())
    }

    pub async fn set_saved_original_prompt(&self, prompt: &str) -> Result<(), StorageError> {
        self.write(keys::SAVED_ORIGINAL_PROMPT, prompt).await
    }

    pub async fn saved_analysis(&self) -> Result<Option<AnalysisResult>, StorageError> {
        self.read(keys::SAVED_ANALYSIS).await
    }

    pub async fn set_saved_analysis(&self, analysis: &AnalysisResult) -> Result<(), StorageError> {
        self.write(keys::SAVED_ANALYSIS, analysis).await
    }

    pub async fn saved_answers(&self) -> Result<RoundAnswers, StorageError> {
        Ok(self.read(keys::SAVED_ANSWERS).await?.unwrap_or_default())
    }

    pub async fn set_saved_answers(&self, answers: &RoundAnswers) -> Result<(), StorageError> {
        self.write(keys::SAVED_ANSWERS, answers).await
    }

    pub async fn saved_answer_history(&self) -> Result<AnswerHistory, StorageError> {
        Ok(self.read(keys::SAVED_ANSWER_HISTORY).await?.unwrap_or_default())
    }

    pub async fn set_saved_answer_history(&self, history: &AnswerHistory) -> Result<(), StorageError> {
        self.write(keys::SAVED_ANSWER_HISTORY, history).await
    }

    pub async fn saved_quality_score(&self) -> Result<Option<u8>, StorageError> {
        self.read(keys::SAVED_QUALITY_SCORE).await
    }

    pub async fn set_saved_quality_score(&self, score: u8) -> Result<(), StorageError> {
        self.write(keys::SAVED_QUALITY_SCORE, &score).await
    }

    /// Remove every session key, leaving settings untouched
    pub async fn clear_session(&self) -> Result<(), StorageError> {
        for key in keys::SESSION {
            self.store.remove(key).await?;
        }
        Ok(())
    }
}
