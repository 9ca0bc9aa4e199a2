//! LLM — chat-completion adapter behind the [`LlmChat`] seam.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables ([`LlmConfig`]). The
//! concrete [`LlmClient`] speaks the OpenAI-compatible chat-completions
//! format used by OpenRouter. Model choice is per request so the chat
//! service can walk its fallback list over one client.

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatRequest, ChatResponse, LlmError};

/// Concrete LLM client, configured by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: openai::OpenAiClient,
    base_url: String,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let base_url = config.base_url.clone();
        Ok(Self { inner: openai::OpenAiClient::new(config)?, base_url })
    }

    /// Provider base URL, for startup logging.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        self.inner.chat(request).await
    }
}
