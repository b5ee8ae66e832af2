// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! HTTP client for the supported backends
//!
//! Callers depend on the [`Generator`] trait so the network can be swapped for
//! a canned reply in tests. [`HttpGenerator`] is the real implementation: one
//! POST per call, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use tracing::{debug, error, info};

use crate::backend::Backend;
use crate::error::ProviderError;
use crate::payload::{ChatRequest, ChatResponse, GeminiRequest, GeminiResponse, compose_prompt};

/// Header carrying the Gemini API key; the key never appears in the URL
const GEMINI_KEY_HEADER: &str = "x-goog-api-key";

/// Everything needed to reach one backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Which API to call
    pub backend: Backend,
    /// Model name passed to the API
    pub model: String,
    /// API key; required by every backend
    pub api_key: Option<String>,
    /// Override for the API root (defaults to [`Backend::default_base_url`])
    pub base_url: Option<String>,
    /// Request timeout; `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Create a config for a backend and model, with no key
    #[must_use]
    pub fn new(backend: Backend, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            api_key: None,
            base_url: None,
            timeout: None,
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL of the generation endpoint, without credentials
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidEndpoint` if the result is not a URL.
    pub fn endpoint(&self) -> Result<Url, ProviderError> {
        let base = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .unwrap_or(self.backend.default_base_url())
            .trim_end_matches('/');

        let endpoint = if self.backend.is_chat_completions() {
            format!("{base}/chat/completions")
        } else {
            format!("{base}/models/{}:generateContent", self.model)
        };

        Url::parse(&endpoint).map_err(|e| ProviderError::InvalidEndpoint(format!("{endpoint}: {e}")))
    }

    fn require_api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingApiKey {
                backend: self.backend,
                env_var: self.backend.api_key_env(),
            })
    }
}

/// The inputs of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Persona sent as the system instruction
    pub system_instruction: String,
    /// Content of the latest assistant turn
    pub assistant_content: String,
    /// Content of the latest user turn
    pub user_content: String,
}

impl GenerationRequest {
    /// Create a request
    #[must_use]
    pub fn new(
        system_instruction: impl Into<String>,
        assistant_content: impl Into<String>,
        user_content: impl Into<String>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            assistant_content: assistant_content.into(),
            user_content: user_content.into(),
        }
    }

    /// The single user message sent to the model
    #[must_use]
    pub fn prompt(&self) -> String {
        compose_prompt(&self.assistant_content, &self.user_content)
    }
}

/// Something that can turn a request into generated text
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a reply
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if the call fails or the reply cannot be
    /// parsed. Implementations must not have side effects on failure.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}

/// [`Generator`] backed by a real HTTP API
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    http: Client,
    config: ProviderConfig,
}

impl HttpGenerator {
    /// Create a generator for the given backend config
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Request` if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    /// The config this generator was built with
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Build the HTTP request for a generation call without sending it
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::MissingApiKey` if no key is configured and
    /// `ProviderError::InvalidEndpoint` if the URL cannot be built.
    pub fn build_request(&self, request: &GenerationRequest) -> Result<RequestBuilder, ProviderError> {
        let api_key = self.config.require_api_key()?;
        let endpoint = self.config.endpoint()?;
        let prompt = request.prompt();

        let builder = if self.config.backend.is_chat_completions() {
            self.http
                .post(endpoint)
                .bearer_auth(api_key)
                .json(&ChatRequest::new(
                    &self.config.model,
                    &request.system_instruction,
                    &prompt,
                ))
        } else {
            self.http
                .post(endpoint)
                .header(GEMINI_KEY_HEADER, api_key)
                .json(&GeminiRequest::new(&request.system_instruction, &prompt))
        };
        Ok(builder)
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let builder = self.build_request(request)?;
        info!(
            backend = %self.config.backend,
            model = %self.config.model,
            "Calling generative-language API"
        );
        debug!(
            prompt_bytes = request.assistant_content.len() + request.user_content.len(),
            "Prompt composed"
        );

        let response = builder.send().await.map_err(ProviderError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ProviderError::transport)?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "API returned an error status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = parse_reply(self.config.backend, &body)?;
        debug!(reply_bytes = text.len(), "Reply received");
        Ok(text)
    }
}

/// Extract the generated text from a successful reply body
///
/// # Errors
///
/// Returns `ProviderError::ResponseMalformed` if the body is not JSON or
/// lacks the text field for that backend.
pub fn parse_reply(backend: Backend, body: &str) -> Result<String, ProviderError> {
    if backend.is_chat_completions() {
        serde_json::from_str::<ChatResponse>(body)
            .map_err(|e| ProviderError::malformed(format!("invalid JSON: {e}")))?
            .into_text()
    } else {
        serde_json::from_str::<GeminiResponse>(body)
            .map_err(|e| ProviderError::malformed(format!("invalid JSON: {e}")))?
            .into_text()
    }
}
