// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Request and response bodies for the supported backends

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Combine the assistant turn and the user turn into one prompt
///
/// The assistant turn is wrapped in back-quotes so the model can tell the
/// quoted context apart from the question that follows it.
#[must_use]
pub fn compose_prompt(assistant_content: &str, user_content: &str) -> String {
    format!("`{assistant_content}`{user_content}")
}

// ============================================================================
// Gemini generateContent
// ============================================================================

/// Body of a `generateContent` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiRequest {
    /// Persona text
    pub system_instruction: GeminiContent,
    /// Conversation; always a single user turn here
    pub contents: Vec<GeminiContent>,
}

impl GeminiRequest {
    /// Build a request from a persona and a prompt
    #[must_use]
    pub fn new(system_instruction: &str, prompt: &str) -> Self {
        Self {
            system_instruction: GeminiContent::text(system_instruction),
            contents: vec![GeminiContent::text(prompt)],
        }
    }
}

/// A content block made of text parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Author of the content, when the API reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Text parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![GeminiPart {
                text: Some(text.to_string()),
            }],
        }
    }
}

/// One part of a content block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text of the part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Body of a `generateContent` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// One generated candidate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiCandidate {
    /// Generated content
    pub content: Option<GeminiContent>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ResponseMalformed` if any step of that path is
    /// missing.
    pub fn into_text(self) -> Result<String, ProviderError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed("response has no candidates"))?;
        let content = candidate
            .content
            .ok_or_else(|| ProviderError::malformed("candidate has no content"))?;
        content
            .parts
            .into_iter()
            .next()
            .and_then(|part| part.text)
            .ok_or_else(|| ProviderError::malformed("candidate content has no text part"))
    }
}

// ============================================================================
// OpenAI-compatible chat completions
// ============================================================================

/// Body of a `chat/completions` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model name
    pub model: String,
    /// System and user messages
    pub messages: Vec<ChatMessage>,
    /// Always false; replies are read whole
    pub stream: bool,
}

impl ChatRequest {
    /// Build a request from a model, a persona and a prompt
    #[must_use]
    pub fn new(model: &str, system_instruction: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_instruction.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
        }
    }
}

/// A chat message in a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system` or `user`
    pub role: String,
    /// Message text
    pub content: String,
}

/// Body of a `chat/completions` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One generated choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    /// Chat-style reply
    pub message: Option<ChatReplyMessage>,
    /// Completion-style reply, used by some compatible servers
    pub text: Option<String>,
}

/// The message inside a choice; `content` can be null
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReplyMessage {
    /// Reply text
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ResponseMalformed` if there is no choice or the
    /// choice carries no text.
    pub fn into_text(self) -> Result<String, ProviderError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed("response has no choices"))?;
        choice
            .message
            .and_then(|message| message.content)
            .or(choice.text)
            .ok_or_else(|| ProviderError::malformed("choice has no message content"))
    }
}
