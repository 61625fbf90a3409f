use refiner_llm_sdk::providers::{Provider, ANTHROPIC};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::AnalysisError;
use crate::storage::PersistedState;

const STATE_FILE_NAME: &str = "state.json";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Optional TOML overrides, e.g.
///
/// ```toml
/// provider = "anthropic"
/// model = "claude-haiku-4-5-20251001"
///
/// [api_keys]
/// anthropic_api_key = "sk-ant-..."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub provider: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub api_keys: HashMap<String, toml::Value>,
}

impl ConfigFile {
    /// `<provider>_api_key`, or its uppercase form
    pub fn api_key_for(&self, provider: &str) -> Option<String> {
        let key = format!("{}_api_key", provider.to_lowercase());
        self.api_keys
            .get(&key)
            .and_then(|v| v.as_str())
            .or_else(|| {
                self.api_keys
                    .get(&key.to_uppercase())
                    .and_then(|v| v.as_str())
            })
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<ConfigFile> {
    let content = std::fs::read_to_string(path)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config)
}

/// `~/.config/refiner` (or the platform equivalent)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("refiner"))
}

pub fn default_state_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(STATE_FILE_NAME))
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Backend selection and credential in effect for a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ANTHROPIC.to_string(),
            model: default_model_for(ANTHROPIC).to_string(),
            api_key: None,
        }
    }
}

impl Settings {
    /// Resolve settings from the store, with config file values taking precedence
    pub async fn load(
        state: &PersistedState,
        overrides: Option<&ConfigFile>,
    ) -> Result<Self, AnalysisError> {
        let provider = match overrides.and_then(|c| c.provider.clone()) {
            Some(provider) => provider,
            None => state
                .provider()
                .await?
                .unwrap_or_else(|| ANTHROPIC.to_string()),
        };

        let model = match overrides.and_then(|c| c.model.clone()) {
            Some(model) => model,
            None => state
                .model()
                .await?
                .unwrap_or_else(|| default_model_for(&provider).to_string()),
        };

        let api_key = match overrides.and_then(|c| c.api_key_for(&provider)) {
            Some(key) => Some(key),
            None => state.api_key().await?,
        };

        Ok(Self {
            provider,
            model,
            api_key,
        })
    }

    pub fn require_api_key(&self) -> Result<&str, AnalysisError> {
        self.api_key
            .as_deref()
            .ok_or(AnalysisError::MissingCredentials)
    }
}

/// Default model for a provider id; unknown ids get the Anthropic default
pub fn default_model_for(provider: &str) -> &'static str {
    Provider::from_id(provider)
        .unwrap_or(Provider::Anthropic)
        .default_model()
}

/// Format check applied before a credential is saved
pub fn validate_api_key(provider: &str, api_key: &str) -> Result<(), AnalysisError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(AnalysisError::Config("Please enter an API key".to_string()));
    }
    if provider.eq_ignore_ascii_case(ANTHROPIC) && !api_key.starts_with("sk-ant-") {
        return Err(AnalysisError::Config(
            "API key should start with \"sk-ant-\"".to_string(),
        ));
    }
    Ok(())
}

/// Limits for outbound completion calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub max_tokens: u32,
    pub credential_test_max_tokens: u32,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            credential_test_max_tokens: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use refiner_llm_sdk::models::{claude, gemini};
    use std::sync::Arc;

    fn state() -> PersistedState {
        PersistedState::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn test_defaults_without_stored_settings() {
        let settings = Settings::load(&state(), None).await.unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.model, claude::SONNET_4_5_ID);
        assert!(matches!(
            settings.require_api_key(),
            Err(AnalysisError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_model_defaults_follow_provider() {
        let state = state();
        state.set_provider("google").await.unwrap();
        let settings = Settings::load(&state, None).await.unwrap();
        assert_eq!(settings.model, gemini::GEMINI_PRO_ID);
    }

    #[tokio::test]
    async fn test_config_file_overrides_store() {
        let state = state();
        state.set_model(claude::OPUS_4_5_ID).await.unwrap();
        state.set_api_key("sk-ant-stored").await.unwrap();

        let config: ConfigFile = toml::from_str(
            r#"
            model = "claude-haiku-4-5-20251001"
            [api_keys]
            ANTHROPIC_API_KEY = "sk-ant-from-file"
            "#,
        )
        .unwrap();

        let settings = Settings::load(&state, Some(&config)).await.unwrap();
        assert_eq!(settings.model, claude::HAIKU_4_5_ID);
        assert_eq!(settings.require_api_key().unwrap(), "sk-ant-from-file");
    }

    #[test]
    fn test_lowercase_key_takes_precedence() {
        let config: ConfigFile = toml::from_str(
            r#"
            [api_keys]
            anthropic_api_key = "lower"
            ANTHROPIC_API_KEY = "upper"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_key_for("anthropic").as_deref(), Some("lower"));
        assert_eq!(config.api_key_for("openai"), None);
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("anthropic", "sk-ant-abc").is_ok());
        assert!(validate_api_key("openai", "sk-proj-abc").is_ok());
        assert!(validate_api_key("anthropic", "  ").is_err());
        let err = validate_api_key("anthropic", "abc").unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: API key should start with \"sk-ant-\"");
    }
}
