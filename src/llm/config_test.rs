use super::*;

use std::sync::{MutexGuard, PoisonError};

fn env_lock() -> MutexGuard<'static, ()> {
    crate::env::ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers hold [`env_lock`].
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("OPENROUTER_API_KEY");
        std::env::remove_var("AI_BASE_URL");
        std::env::remove_var("AI_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("AI_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("AI_REFERER");
        std::env::remove_var("AI_TITLE");
    }
}

#[test]
fn from_env_defaults() {
    let _env = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENROUTER_API_KEY", "sk-or-test");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "sk-or-test");
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg.referer, "http://localhost:5173");
    assert_eq!(cfg.title, "Portfolio Chat");

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENROUTER_API_KEY", "sk-or-test");
        std::env::set_var("AI_BASE_URL", "https://example.test/v1/");
        std::env::set_var("AI_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("AI_CONNECT_TIMEOUT_SECS", "7");
        std::env::set_var("AI_TITLE", "Folio");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
    assert_eq!(cfg.title, "Folio");

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_key_errors() {
    let _env = env_lock();
    unsafe { clear_llm_env() };

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "OPENROUTER_API_KEY"));
}

#[test]
fn from_env_rejects_placeholder_key() {
    let _env = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENROUTER_API_KEY", "your_openrouter_api_key_here");
    }

    assert!(LlmConfig::from_env().is_err());

    unsafe { clear_llm_env() };
}
