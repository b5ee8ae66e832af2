// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! promptlog-provider: generative-language API clients for promptlog
//!
//! This library crate turns a persona, the latest assistant turn and the
//! latest user turn into one request for a hosted model, and extracts the
//! generated text from the reply.
//!
//! ## Backends
//!
//! - **gemini** (default): Google's `models/<model>:generateContent` endpoint,
//!   authenticated with the `x-goog-api-key` header.
//! - **openai** and **deepseek**: OpenAI-compatible `chat/completions`
//!   endpoints, authenticated with a bearer token.
//!
//! ## Example
//!
//! ```rust,no_run
//! use promptlog_provider::{Backend, GenerationRequest, Generator, HttpGenerator, ProviderConfig};
//!
//! # async fn example() -> Result<(), promptlog_provider::ProviderError> {
//! let config = ProviderConfig::new(Backend::Gemini, "gemini-1.5-flash")
//!     .with_api_key(std::env::var("GOOGLE_API_KEY").unwrap_or_default());
//! let generator = HttpGenerator::new(config)?;
//! let reply = generator
//!     .generate(&GenerationRequest::new(
//!         "You are an expert developer.",
//!         "### Files ###\nsrc/\n",
//!         "What does this project do?",
//!     ))
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod client;
pub mod error;
pub mod payload;

pub use backend::Backend;
pub use client::{GenerationRequest, Generator, HttpGenerator, ProviderConfig, parse_reply};
pub use error::ProviderError;
pub use payload::compose_prompt;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::backend::Backend;
    pub use crate::client::{GenerationRequest, Generator, HttpGenerator, ProviderConfig};
    pub use crate::error::ProviderError;
}
