use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::error::ErrorCode;
use crate::rate_limit::RateLimitConfig;
use crate::resume::Resume;
use crate::store::Store;
use crate::state::test_helpers::{MemoryStore, MockLlm, fast_chat_settings, reply, status, test_app_state_with};

fn setup(script: Vec<Result<crate::llm::types::ChatResponse, LlmError>>) -> (AppState, Arc<MemoryStore>, Arc<MockLlm>) {
    let store = Arc::new(MemoryStore::default());
    let llm = Arc::new(MockLlm::new(script));
    let state = test_app_state_with(store.clone(), Some(llm.clone()));
    (state, store, llm)
}

// =========================================================================
// settings
// =========================================================================

#[test]
fn default_model_order_is_deduplicated() {
    let settings = ChatSettings::default();
    assert_eq!(
        settings.models,
        [
            "meta-llama/llama-3.2-3b-instruct:free",
            "nvidia/nemotron-nano-9b-v2:free",
            "qwen/qwen3-4b:free",
            "meta-llama/llama-3.3-70b-instruct:free",
        ]
    );
    assert_eq!(settings.max_tokens, 500);
    assert_eq!(settings.max_retries, 3);
    assert_eq!(settings.history_limit, 10);
}

#[test]
fn model_order_keeps_first_occurrence() {
    let order = model_order("b", vec!["a".into(), "b".into(), String::new(), "a".into(), "c".into()]);
    assert_eq!(order, ["b", "a", "c"]);
}

#[test]
fn backoff_is_linear() {
    let base = Duration::from_secs(3);
    let delays: Vec<_> = (0..3).map(|a| backoff_delay(base, a).as_secs()).collect();
    assert_eq!(delays, [3, 6, 9]);
}

// =========================================================================
// handle_message
// =========================================================================

#[tokio::test]
async fn not_configured_without_llm() {
    let store = Arc::new(MemoryStore::default());
    let state = test_app_state_with(store.clone(), None);

    let err = handle_message(&state, "s", "hi").await.unwrap_err();
    assert!(matches!(err, ChatError::NotConfigured));
    assert_eq!(err.to_string(), "OpenRouter API key not configured. Please set OPENROUTER_API_KEY in .env");
    assert!(store.session("s").is_empty());
}

#[tokio::test]
async fn success_persists_exchange() {
    let (state, store, llm) = setup(vec![Ok(reply("Alex knows Rust."))]);

    let text = handle_message(&state, "s", "What does Alex know?").await.unwrap();

    assert_eq!(text, "Alex knows Rust.");
    assert_eq!(llm.models_called(), ["primary"]);
    assert_eq!(
        store.session("s"),
        [(Role::User, "What does Alex know?".to_string()), (Role::Assistant, "Alex knows Rust.".to_string())]
    );
}

#[tokio::test]
async fn prompt_is_system_history_then_user() {
    let (state, store, llm) = setup(vec![]);
    store.save_message("s", Role::User, "earlier q").await.unwrap();
    store.save_message("s", Role::Assistant, "earlier a").await.unwrap();

    handle_message(&state, "s", "now").await.unwrap();

    let calls = llm.calls.lock().unwrap();
    let messages = &calls[0].1;
    let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::System, Role::User, Role::Assistant, Role::User]);
    assert!(messages[0].content.contains("Alex Chen's portfolio"));
    assert!(messages[0].content.contains("DATA:{"));
    assert_eq!(messages[3].content, "now");
}

#[tokio::test]
async fn history_is_capped() {
    let (state, store, llm) = setup(vec![]);
    for i in 0..15 {
        store.save_message("s", Role::User, &format!("q{i}")).await.unwrap();
    }

    handle_message(&state, "s", "now").await.unwrap();

    let calls = llm.calls.lock().unwrap();
    let messages = &calls[0].1;
    // system + 10 history + user
    assert_eq!(messages.len(), 12);
    assert_eq!(messages[1].content, "q5");
}

#[tokio::test]
async fn rate_limited_retries_same_model() {
    let (state, _store, llm) = setup(vec![Err(status(429)), Ok(reply("ok"))]);

    assert_eq!(handle_message(&state, "s", "hi").await.unwrap(), "ok");
    assert_eq!(llm.models_called(), ["primary", "primary"]);
}

#[tokio::test]
async fn rate_limit_exhausts_retries_then_falls_back() {
    let (state, _store, llm) = setup(vec![Err(status(429)), Err(status(429)), Ok(reply("from fallback"))]);

    assert_eq!(handle_message(&state, "s", "hi").await.unwrap(), "from fallback");
    assert_eq!(llm.models_called(), ["primary", "primary", "fallback-a"]);
}

#[tokio::test]
async fn other_status_moves_to_next_model_immediately() {
    let (state, _store, llm) = setup(vec![Err(status(404)), Err(status(500)), Ok(reply("third"))]);

    assert_eq!(handle_message(&state, "s", "hi").await.unwrap(), "third");
    assert_eq!(llm.models_called(), ["primary", "fallback-a", "fallback-b"]);
}

#[tokio::test]
async fn all_models_exhausted_reports_last_error() {
    let script = (0..6).map(|_| Err(status(429))).collect();
    let (state, store, llm) = setup(script);

    let err = handle_message(&state, "s", "hi").await.unwrap_err();

    assert_eq!(llm.calls.lock().unwrap().len(), 6);
    assert!(matches!(err, ChatError::Exhausted { .. }));
    let detail = err.to_string();
    assert!(detail.starts_with("The AI service is rate-limiting requests."));
    assert!(detail.contains("Last error: Rate limited (429) on model fallback-b, attempt 2"));
    assert!(err.retryable());
    assert!(store.session("s").is_empty());
}

#[tokio::test]
async fn timeout_stops_immediately() {
    let (state, store, llm) = setup(vec![Err(LlmError::Timeout), Ok(reply("never"))]);

    let err = handle_message(&state, "s", "hi").await.unwrap_err();

    assert!(matches!(err, ChatError::Timeout));
    assert_eq!(err.to_string(), "AI service timeout — please try again.");
    assert_eq!(llm.calls.lock().unwrap().len(), 1);
    assert!(store.session("s").is_empty());
}

#[tokio::test]
async fn transport_error_is_not_retried() {
    let (state, _store, llm) = setup(vec![Err(LlmError::ApiRequest("connection reset".into()))]);

    let err = handle_message(&state, "s", "hi").await.unwrap_err();

    assert!(matches!(err, ChatError::Llm(LlmError::ApiRequest(_))));
    assert_eq!(err.error_code(), "E_LLM_ERROR");
    assert_eq!(llm.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn session_rate_limit_rejects_before_upstream() {
    let store = Arc::new(MemoryStore::default());
    let llm = Arc::new(MockLlm::default());
    let limits = RateLimitConfig { per_session_limit: 1, ..RateLimitConfig::default() };
    let state = AppState::new(
        store,
        Some(llm.clone() as Arc<dyn crate::llm::LlmChat>),
        fast_chat_settings(),
        Resume::embedded().unwrap(),
        limits,
    );

    handle_message(&state, "s", "one").await.unwrap();
    let err = handle_message(&state, "s", "two").await.unwrap_err();

    assert!(matches!(err, ChatError::RateLimited(_)));
    assert_eq!(llm.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn history_load_failure_is_a_store_error() {
    let (state, store, llm) = setup(vec![]);
    store.fail.store(true, std::sync::atomic::Ordering::SeqCst);

    let err = handle_message(&state, "s", "hi").await.unwrap_err();

    assert!(matches!(err, ChatError::Store(_)));
    assert!(llm.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_reply_save_stores_neither_turn() {
    let (state, store, llm) = setup(vec![Ok(reply("answer"))]);
    *store.fail_after_writes.lock().unwrap() = Some(1);

    let err = handle_message(&state, "s", "question").await.unwrap_err();

    assert!(matches!(err, ChatError::Store(_)));
    assert_eq!(llm.calls.lock().unwrap().len(), 1);
    assert!(store.session("s").is_empty());
}

#[tokio::test]
async fn orphan_turn_never_reaches_next_prompt() {
    let (state, store, llm) = setup(vec![Ok(reply("lost")), Ok(reply("kept"))]);
    *store.fail_after_writes.lock().unwrap() = Some(1);
    handle_message(&state, "s", "first").await.unwrap_err();

    *store.fail_after_writes.lock().unwrap() = None;
    handle_message(&state, "s", "second").await.unwrap();

    let calls = llm.calls.lock().unwrap();
    let (_, prompt) = &calls[1];
    assert_eq!(prompt.len(), 2);
    assert_eq!(prompt[1].content, "second");
}
