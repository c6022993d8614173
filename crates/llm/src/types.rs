//! Provider identifiers.

use serde::{Deserialize, Serialize};

/// Hosted LLM provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Anthropic,
    OpenAI,
    Gemini,
}

impl ProviderType {
    /// Display order used when listing models.
    pub const ALL: [ProviderType; 3] = [Self::Anthropic, Self::OpenAI, Self::Gemini];

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAI => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Heading shown above this provider's models.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Anthropic => "Anthropic Claude",
            Self::OpenAI => "OpenAI GPT",
            Self::Gemini => "Google Gemini",
        }
    }

    /// Environment variable holding the API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Gemini => "GOOGLE_API_KEY",
        }
    }

    /// Where a user can obtain a key.
    pub fn api_key_url(&self) -> &'static str {
        match self {
            Self::Anthropic => "https://console.anthropic.com/",
            Self::OpenAI => "https://platform.openai.com/api-keys",
            Self::Gemini => "https://aistudio.google.com/app/apikey",
        }
    }

    /// Default API base URL.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com",
            Self::OpenAI => "https://api.openai.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
