//! AI completion provider abstraction
//!
//! The recommendation engine talks to a language model through this trait so
//! the backing service can be swapped, and replaced with a mock in tests.

use crate::error::AppResult;

pub mod openai;

pub use openai::OpenAiProvider;

/// A single chat-style completion call: one system and one user message
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    pub temperature: f32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends the request and returns the model's raw text reply
    async fn complete(&self, request: &CompletionRequest) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
