//! Chat service — resume-grounded Q&A through the completion provider.
//!
//! DESIGN
//! ======
//! Each message is answered from the resume system prompt plus the recent
//! session history. Models are tried in order; a 429 from the provider is
//! retried on the same model with linear backoff, any other provider status
//! moves on to the next model. The exchange is persisted only once a model
//! has answered, so failed turns never leak into later context.

use std::time::Duration;

use tracing::{info, warn};

use crate::env::{env_parse, env_string};
use crate::error::ErrorCode;
use crate::llm::types::{ChatRequest, LlmError, Message, Role};
use crate::rate_limit::RateLimitError;
use crate::state::AppState;
use crate::store::StoreError;

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.2-3b-instruct:free";
pub const DEFAULT_FALLBACK_MODELS: [&str; 4] = [
    "nvidia/nemotron-nano-9b-v2:free",
    "qwen/qwen3-4b:free",
    "meta-llama/llama-3.3-70b-instruct:free",
    "meta-llama/llama-3.2-3b-instruct:free",
];
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_MS: u64 = 3000;
const DEFAULT_HISTORY_LIMIT: i64 = 10;

// =============================================================================
// SETTINGS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Primary model first, then fallbacks. No duplicates.
    pub models: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Attempts per model when the provider answers 429.
    pub max_retries: u32,
    /// Base delay; attempt `n` waits `backoff * (n + 1)`.
    pub backoff: Duration,
    pub history_limit: i64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        let fallbacks = DEFAULT_FALLBACK_MODELS.iter().map(|m| (*m).to_string()).collect();
        Self {
            models: model_order(DEFAULT_MODEL, fallbacks),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ChatSettings {
    /// Read `AI_MODEL`, `AI_FALLBACK_MODELS` (comma separated),
    /// `AI_MAX_TOKENS`, `AI_TEMPERATURE`, `CHAT_MAX_RETRIES`,
    /// `CHAT_BACKOFF_MS` and `CHAT_HISTORY_LIMIT`.
    #[must_use]
    pub fn from_env() -> Self {
        let primary = env_string("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let fallbacks = match env_string("AI_FALLBACK_MODELS") {
            Some(list) => list.split(',').map(|m| m.trim().to_string()).collect(),
            None => DEFAULT_FALLBACK_MODELS.iter().map(|m| (*m).to_string()).collect(),
        };
        Self {
            models: model_order(&primary, fallbacks),
            max_tokens: env_parse("AI_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            temperature: env_parse("AI_TEMPERATURE", DEFAULT_TEMPERATURE),
            max_retries: env_parse("CHAT_MAX_RETRIES", DEFAULT_MAX_RETRIES).max(1),
            backoff: Duration::from_millis(env_parse("CHAT_BACKOFF_MS", DEFAULT_BACKOFF_MS)),
            history_limit: env_parse("CHAT_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT),
        }
    }
}

/// Primary followed by fallbacks, first occurrence wins, blanks dropped.
pub(crate) fn model_order(primary: &str, fallbacks: Vec<String>) -> Vec<String> {
    let mut models: Vec<String> = Vec::with_capacity(fallbacks.len() + 1);
    for model in std::iter::once(primary.to_string()).chain(fallbacks) {
        if !model.is_empty() && !models.contains(&model) {
            models.push(model);
        }
    }
    models
}

pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(attempt + 1)
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("OpenRouter API key not configured. Please set OPENROUTER_API_KEY in .env")]
    NotConfigured,
    #[error("{0}")]
    RateLimited(#[from] RateLimitError),
    #[error(
        "The AI service is rate-limiting requests. Please wait a few seconds and try again. Last error: {last_error}"
    )]
    Exhausted { last_error: String },
    #[error("AI service timeout — please try again.")]
    Timeout,
    #[error("{0}")]
    Llm(LlmError),
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::RateLimited(_) => "E_RATE_LIMITED",
            Self::Exhausted { .. } => "E_MODELS_EXHAUSTED",
            Self::Timeout => "E_LLM_TIMEOUT",
            Self::Llm(_) => "E_LLM_ERROR",
            Self::Store(_) => "E_STORE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::Exhausted { .. } | Self::Timeout => true,
            Self::Llm(e) => e.retryable(),
            Self::Store(e) => e.retryable(),
            Self::NotConfigured => false,
        }
    }
}

impl From<LlmError> for ChatError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Timeout => Self::Timeout,
            other => Self::Llm(other),
        }
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Answer `message` for `session_id` and record the exchange.
///
/// # Errors
///
/// See [`ChatError`]; nothing is persisted on any error path.
pub async fn handle_message(state: &AppState, session_id: &str, message: &str) -> Result<String, ChatError> {
    let llm = state.llm.as_ref().ok_or(ChatError::NotConfigured)?;
    state.rate_limiter.check_and_record(session_id)?;

    let settings = &state.chat;
    let history = state
        .store
        .recent_messages(session_id, settings.history_limit)
        .await?;
    info!(%session_id, history = history.len(), message_len = message.len(), "chat: message received");

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::new(Role::System, state.resume.system_prompt()));
    messages.extend(history.into_iter().map(|m| Message::new(m.role, m.content)));
    messages.push(Message::new(Role::User, message));

    let mut last_error = String::new();
    for model in &settings.models {
        for attempt in 0..settings.max_retries {
            let request = ChatRequest {
                model,
                max_tokens: settings.max_tokens,
                temperature: settings.temperature,
                messages: &messages,
            };
            match llm.chat(request).await {
                Ok(response) => {
                    state
                        .store
                        .save_exchange(session_id, message, &response.text)
                        .await?;
                    info!(
                        %session_id,
                        %model,
                        attempt,
                        served_by = %response.model,
                        input_tokens = response.input_tokens,
                        output_tokens = response.output_tokens,
                        "chat: answered"
                    );
                    return Ok(response.text);
                }
                Err(e) if e.is_rate_limited() => {
                    let wait = backoff_delay(settings.backoff, attempt);
                    last_error = format!("Rate limited (429) on model {model}, attempt {}", attempt + 1);
                    warn!(%session_id, %model, attempt, ?wait, "chat: provider rate limited");
                    tokio::time::sleep(wait).await;
                }
                Err(e @ LlmError::ApiResponse { .. }) => {
                    warn!(%session_id, %model, error = %e, "chat: provider error, trying next model");
                    last_error = e.to_string();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    warn!(%session_id, %last_error, "chat: all models exhausted");
    Err(ChatError::Exhausted { last_error })
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
