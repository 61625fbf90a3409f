use refiner_core::analysis::PromptAnalyzer;
use refiner_core::commands::CommandHandler;
use refiner_core::config::{default_config_path, default_state_path, load_config, ConfigFile, Settings};
use refiner_core::session::RefinementSession;
use refiner_core::storage::{JsonFileStore, PersistedState};
use refiner_llm_sdk::gateway::ProviderGateway;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::CliError;

/// Shared wiring for every subcommand: state store, analyzer and overrides
pub struct AppContext {
    pub state: PersistedState,
    pub analyzer: Arc<PromptAnalyzer>,
    pub overrides: Option<ConfigFile>,
    pub state_path: PathBuf,
    pub config_path: Option<PathBuf>,
}

impl AppContext {
    pub fn from_paths(state: Option<&Path>, config: Option<&Path>) -> Result<Self, CliError> {
        let state_path = state
            .map(Path::to_path_buf)
            .or_else(default_state_path)
            .ok_or_else(|| {
                CliError::Config(
                    "Could not determine a config directory; pass --state <file>".to_string(),
                )
            })?;

        let config_path = match config {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|path| path.exists()),
        };
        let overrides = config_path
            .as_deref()
            .map(|path| {
                load_config(path).map_err(|e| {
                    CliError::Config(format!("Failed to load {}: {}", path.display(), e))
                })
            })
            .transpose()?;

        debug!(state = %state_path.display(), config = ?config_path, "Using paths");

        Ok(Self {
            state: PersistedState::new(Arc::new(JsonFileStore::new(&state_path))),
            analyzer: Arc::new(PromptAnalyzer::new(Arc::new(ProviderGateway::new()))),
            overrides,
            state_path,
            config_path,
        })
    }

    pub async fn settings(&self) -> Result<Settings, CliError> {
        Ok(Settings::load(&self.state, self.overrides.as_ref()).await?)
    }

    pub fn session(&self) -> RefinementSession {
        RefinementSession::new(self.analyzer.clone(), self.state.clone())
            .with_overrides(self.overrides.clone())
    }

    pub fn handler(&self) -> CommandHandler {
        CommandHandler::new(self.analyzer.clone(), self.state.clone())
            .with_overrides(self.overrides.clone())
    }
}
