//! LLM configuration parsed from environment variables.

use super::types::LlmError;
use crate::env::{env_parse, env_string};

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REFERER: &str = "http://localhost:5173";
pub const DEFAULT_TITLE: &str = "Portfolio Chat";

/// Value shipped in the sample `.env`; treated the same as an unset key.
const PLACEHOLDER_API_KEY: &str = "your_openrouter_api_key_here";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeouts: LlmTimeouts,
    /// Sent as `HTTP-Referer` for provider attribution.
    pub referer: String,
    /// Sent as `X-Title`.
    pub title: String,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY`
    ///
    /// Optional:
    /// - `AI_BASE_URL`: default `https://openrouter.ai/api/v1`
    /// - `AI_REQUEST_TIMEOUT_SECS`: default 60
    /// - `AI_CONNECT_TIMEOUT_SECS`: default 10
    /// - `AI_REFERER`, `AI_TITLE`: attribution headers
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the key is unset, blank, or
    /// still the sample placeholder.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env_string(API_KEY_VAR)
            .filter(|k| k != PLACEHOLDER_API_KEY)
            .ok_or_else(|| LlmError::MissingApiKey { var: API_KEY_VAR.into() })?;

        let base_url = env_string("AI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = LlmTimeouts {
            request_secs: env_parse("AI_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("AI_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key,
            base_url,
            timeouts,
            referer: env_string("AI_REFERER").unwrap_or_else(|| DEFAULT_REFERER.to_string()),
            title: env_string("AI_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
