//! Supported API backends

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A hosted model API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Google generative-language API
    #[default]
    Gemini,
    /// OpenAI chat completions
    #[serde(alias = "chatgpt")]
    OpenAi,
    /// DeepSeek chat completions (OpenAI-compatible)
    DeepSeek,
}

impl Backend {
    /// All backends, in display order
    pub const ALL: [Backend; 3] = [Backend::Gemini, Backend::OpenAi, Backend::DeepSeek];

    /// Name used in config files and on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Gemini => "gemini",
            Backend::OpenAi => "openai",
            Backend::DeepSeek => "deepseek",
        }
    }

    /// Model used when none is configured
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Backend::Gemini => "gemini-1.5-flash",
            Backend::OpenAi => "gpt-4.1",
            Backend::DeepSeek => "deepseek-chat",
        }
    }

    /// Environment variable holding the API key
    #[must_use]
    pub fn api_key_env(self) -> &'static str {
        match self {
            Backend::Gemini => "GOOGLE_API_KEY",
            Backend::OpenAi => "OPENAI_API_KEY",
            Backend::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    /// API root used when no base URL is configured
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Backend::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Backend::OpenAi => "https://api.openai.com/v1",
            Backend::DeepSeek => "https://api.deepseek.com/v1",
        }
    }

    /// Whether the backend speaks the chat-completions protocol
    #[must_use]
    pub fn is_chat_completions(self) -> bool {
        matches!(self, Backend::OpenAi | Backend::DeepSeek)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Backend::Gemini),
            "openai" | "chatgpt" => Ok(Backend::OpenAi),
            "deepseek" => Ok(Backend::DeepSeek),
            other => Err(format!(
                "unknown provider '{other}' (expected gemini, openai or deepseek)"
            )),
        }
    }
}
