//! Provider registry
//!
//! Canonical provider ids plus the closed set of backends the gateway knows
//! about. Only Anthropic is wired to a client; the others are recognized so
//! that a stale setting produces a clear message instead of a lookup failure.

use std::fmt;
use std::str::FromStr;

use crate::error::LlmError;
use crate::models;

/// Anthropic (Claude) provider
pub const ANTHROPIC: &str = "anthropic";

/// OpenAI provider
pub const OPENAI: &str = "openai";

/// Google (Gemini models)
pub const GOOGLE: &str = "google";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
    OpenAi,
    Google,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Anthropic, Provider::OpenAi, Provider::Google];

    /// Look up a provider by id, failing for ids that are not registered
    pub fn from_id(id: &str) -> Result<Self, LlmError> {
        match id.trim().to_lowercase().as_str() {
            ANTHROPIC => Ok(Provider::Anthropic),
            OPENAI => Ok(Provider::OpenAi),
            GOOGLE => Ok(Provider::Google),
            other => Err(LlmError::unsupported_backend(format!(
                "Unknown provider: {}",
                other
            ))),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Provider::Anthropic => ANTHROPIC,
            Provider::OpenAi => OPENAI,
            Provider::Google => GOOGLE,
        }
    }

    /// Human-readable name used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Anthropic => "Anthropic",
            Provider::OpenAi => "OpenAI",
            Provider::Google => "Google Gemini",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => models::claude::SONNET_4_5_ID,
            Provider::OpenAi => models::openai::GPT_4_ID,
            Provider::Google => models::gemini::GEMINI_PRO_ID,
        }
    }

    /// Whether a client exists for this provider
    pub fn is_available(&self) -> bool {
        matches!(self, Provider::Anthropic)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::from_id(s)
    }
}
