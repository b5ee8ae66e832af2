// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Settings file and value resolution
//!
//! Every value is resolved in the same order: command-line argument, then
//! settings file, then environment, then a built-in default. The environment
//! is passed in as a lookup function so resolution stays pure.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use promptlog_provider::{Backend, ProviderConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// File name of the settings file inside the ledger directory
pub const SETTINGS_FILE_NAME: &str = "config.yaml";

/// Persona used when none is configured
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are an expert developer.";

/// Patterns always excluded from snapshots unless overridden
pub const DEFAULT_IGNORES: [&str; 2] = [".git", ".assistant"];

/// Environment variable selecting the backend
pub const PROVIDER_ENV: &str = "PROMPTLOG_PROVIDER";

/// Environment variable selecting the model
pub const MODEL_ENV: &str = "PROMPTLOG_MODEL";

/// Starter settings written by `promptlog setup`
pub const SETTINGS_TEMPLATE: &str = "\
# promptlog settings
#
# Values given on the command line win over this file; this file wins over
# the environment (PROMPTLOG_PROVIDER, PROMPTLOG_MODEL and the provider's
# API key variable).

# gemini | openai | deepseek
provider: gemini
model: gemini-1.5-flash
system_instruction:
  - You are an expert developer.
# Leave unset and export GOOGLE_API_KEY, OPENAI_API_KEY or DEEPSEEK_API_KEY.
# api_key:
# base_url:
# timeout_secs: 120
default_ignores:
  - .git
  - .assistant
";

/// Errors that can occur while loading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// Settings file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML for the settings schema
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Settings file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_yaml::Error,
    },
}

/// Persona as written in the settings file: one string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemInstruction {
    /// A single persona
    One(String),
    /// A list; only the first entry is used
    Many(Vec<String>),
}

impl SystemInstruction {
    /// The persona text in effect
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(text) => Some(text.as_str()),
            Self::Many(list) => list.first().map(String::as_str),
        }
    }
}

/// Contents of a settings file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Backend to call
    pub provider: Option<Backend>,
    /// Model name
    pub model: Option<String>,
    /// Persona sent as the system instruction
    pub system_instruction: Option<SystemInstruction>,
    /// API key (the environment is preferred)
    pub api_key: Option<String>,
    /// Override for the API root
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Patterns excluded from every snapshot
    pub default_ignores: Option<Vec<String>>,
}

impl Settings {
    /// Parse settings from YAML text; blank text yields defaults
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the text does not match the schema.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Load a settings file, returning `None` if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Read` if the file exists but cannot be read and
    /// `SettingsError::Parse` if it is malformed.
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = Self::from_yaml(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Settings loaded");
        Ok(Some(settings))
    }

    /// Find and load the settings in effect
    ///
    /// Looks at `explicit` if given, otherwise `<ledger_dir>/config.yaml` and
    /// then the user config directory. Returns defaults and `None` when no
    /// file exists. A file that cannot be read or parsed is logged and
    /// defaults are used instead.
    #[must_use]
    pub fn discover(explicit: Option<&Path>, ledger_dir: &Path) -> (Self, Option<PathBuf>) {
        let candidates: Vec<PathBuf> = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => std::iter::once(ledger_dir.join(SETTINGS_FILE_NAME))
                .chain(user_settings_path())
                .collect(),
        };

        for path in candidates {
            match Self::load(&path) {
                Ok(Some(settings)) => {
                    info!(path = %path.display(), "Using settings file");
                    return (settings, Some(path));
                }
                Ok(None) => debug!(path = %path.display(), "Settings file not found"),
                Err(e) => {
                    error!(error = %e, "Ignoring settings file. Using defaults.");
                    return (Self::default(), None);
                }
            }
        }

        info!("No settings file found. Using defaults.");
        (Self::default(), None)
    }

    /// The persona in effect
    #[must_use]
    pub fn system_instruction(&self) -> &str {
        self.system_instruction
            .as_ref()
            .and_then(SystemInstruction::first)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_INSTRUCTION)
    }

    /// Patterns excluded from every snapshot
    #[must_use]
    pub fn ignore_patterns(&self) -> Vec<String> {
        match &self.default_ignores {
            Some(patterns) => patterns.clone(),
            None => DEFAULT_IGNORES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// `<user config dir>/promptlog/config.yaml`, when the platform has one
#[must_use]
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("promptlog").join(SETTINGS_FILE_NAME))
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--provider`
    pub provider: Option<Backend>,
    /// `--model`
    pub model: Option<String>,
    /// `--api-key`
    pub api_key: Option<String>,
}

/// Resolve the backend, model and credentials for a `run`
///
/// `env` looks up an environment variable; blank values count as unset. An
/// unknown backend in `PROMPTLOG_PROVIDER` is logged and the default backend
/// is used. The settings model is only used with the settings provider.
pub fn resolve_provider<F>(overrides: &Overrides, settings: &Settings, env: F) -> ProviderConfig
where
    F: Fn(&str) -> Option<String>,
{
    let env = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    let backend = overrides
        .provider
        .or(settings.provider)
        .or_else(|| {
            env(PROVIDER_ENV).and_then(|value| {
                value
                    .parse()
                    .map_err(|reason: String| {
                        warn!(var = PROVIDER_ENV, %reason, "Ignoring unknown provider");
                    })
                    .ok()
            })
        })
        .unwrap_or_default();

    let settings_model = settings.model.clone().filter(|_| {
        let matches = settings.provider.is_none_or(|provider| provider == backend);
        if !matches {
            info!(%backend, "Settings model belongs to another provider. Using the provider default.");
        }
        matches
    });

    let model = overrides
        .model
        .clone()
        .or(settings_model)
        .or_else(|| env(MODEL_ENV))
        .unwrap_or_else(|| backend.default_model().to_string());

    let api_key = overrides
        .api_key
        .clone()
        .or_else(|| settings.api_key.clone())
        .or_else(|| env(backend.api_key_env()));

    let mut config = ProviderConfig::new(backend, model);
    config.api_key = api_key;
    config.base_url = settings.base_url.clone();
    config.timeout = settings.timeout_secs.map(Duration::from_secs);

    debug!(
        backend = %config.backend,
        model = %config.model,
        has_api_key = config.api_key.is_some(),
        "Provider resolved"
    );
    config
}

/// Environment lookup backed by the process environment
#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let settings = Settings::from_yaml(SETTINGS_TEMPLATE).expect("template is valid");
        assert_eq!(settings.provider, Some(Backend::Gemini));
        assert_eq!(settings.system_instruction(), DEFAULT_SYSTEM_INSTRUCTION);
        assert_eq!(settings.ignore_patterns(), vec![".git", ".assistant"]);
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_blank_file_is_default() {
        assert_eq!(Settings::from_yaml("\n  \n").expect("blank"), Settings::default());
    }

    #[test]
    fn test_system_instruction_string_or_list() {
        let one = Settings::from_yaml("system_instruction: Be brief.").expect("string");
        assert_eq!(one.system_instruction(), "Be brief.");
        let many =
            Settings::from_yaml("system_instruction:\n  - First\n  - Second\n").expect("list");
        assert_eq!(many.system_instruction(), "First");
        let empty = Settings::from_yaml("system_instruction: []").expect("empty list");
        assert_eq!(empty.system_instruction(), DEFAULT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_empty_ignore_list_is_respected() {
        let settings = Settings::from_yaml("default_ignores: []").expect("parse");
        assert!(settings.ignore_patterns().is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Settings::from_yaml("providr: gemini").is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(Settings::from_yaml("provider: claude").is_err());
    }

    #[test]
    fn test_chatgpt_alias() {
        let settings = Settings::from_yaml("provider: chatgpt").expect("alias");
        assert_eq!(settings.provider, Some(Backend::OpenAi));
    }
}
