//! Model constants for supported LLM providers
//!
//! Model IDs are sourced from official provider documentation.

/// Claude model constants
pub mod claude {
    /// Claude Sonnet 4.5 - Smart model for complex agents and coding
    /// Released: 2025-09-29
    pub const SONNET_4_5_ID: &str = "claude-sonnet-4-5-20250929";
    pub const SONNET_4_5_NAME: &str = "Claude Sonnet 4.5";

    /// Alternate Sonnet 4.5 snapshot id still present in saved settings
    pub const SONNET_4_5_ALT_ID: &str = "claude-sonnet-4-5-20251001";

    /// Claude Haiku 4.5 - Fastest model with near-frontier intelligence
    /// Released: 2025-10-01
    pub const HAIKU_4_5_ID: &str = "claude-haiku-4-5-20251001";
    pub const HAIKU_4_5_NAME: &str = "Claude Haiku 4.5";

    /// Claude Opus 4.5
    pub const OPUS_4_5_ID: &str = "claude-opus-4-5-20251001";
    pub const OPUS_4_5_NAME: &str = "Claude Opus 4.5";
}

/// OpenAI model constants
pub mod openai {
    pub const GPT_4_ID: &str = "gpt-4";
    pub const GPT_4_NAME: &str = "GPT-4";
}

/// Google Gemini model constants
pub mod gemini {
    pub const GEMINI_PRO_ID: &str = "gemini-pro";
    pub const GEMINI_PRO_NAME: &str = "Gemini Pro";
}
