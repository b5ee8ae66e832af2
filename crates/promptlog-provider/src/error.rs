// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for promptlog-provider

use thiserror::Error;

use crate::backend::Backend;

/// Errors that can occur while calling a generative-language API
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key was configured for the backend
    #[error("{backend} API key not found; set {env_var} or api_key in the config file")]
    MissingApiKey {
        /// Backend that needed the key
        backend: Backend,
        /// Environment variable the key is usually read from
        env_var: &'static str,
    },

    /// The endpoint URL could not be built
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// Transport-level failure (connection, TLS, timeout)
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the server
        body: String,
    },

    /// The reply did not have the expected shape
    #[error("could not process API response: {reason}")]
    ResponseMalformed {
        /// What was missing or wrong
        reason: String,
    },
}

impl ProviderError {
    /// Wrap a transport error with its URL removed
    #[must_use]
    pub fn transport(error: reqwest::Error) -> Self {
        Self::Request(error.without_url())
    }

    /// Create a response-parsing error
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::ResponseMalformed {
            reason: reason.into(),
        }
    }

    /// Whether the request never produced a usable HTTP exchange
    #[must_use]
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { .. })
    }

    /// Whether the reply arrived but could not be parsed
    #[must_use]
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::ResponseMalformed { .. })
    }
}
