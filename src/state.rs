//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the storage backend, the optional LLM client, chat settings,
//! the loaded resume and the in-memory chat rate limiter.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::resume::Resume;
use crate::services::chat::ChatSettings;
use crate::store::Store;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Optional LLM client. `None` if the API key is not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub chat: Arc<ChatSettings>,
    pub resume: Arc<Resume>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        llm: Option<Arc<dyn LlmChat>>,
        chat: ChatSettings,
        resume: Resume,
        rate_limits: RateLimitConfig,
    ) -> Self {
        Self {
            store,
            llm,
            chat: Arc::new(chat),
            resume: Arc::new(resume),
            rate_limiter: RateLimiter::new(rate_limits),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use time::OffsetDateTime;

    use super::*;
    use crate::llm::types::{ChatRequest, ChatResponse, LlmError, Message, Role};
    use crate::store::{NewContact, StoreError, StoredMessage};

    /// In-memory [`Store`]. Set `fail` to make every call return an error,
    /// or `fail_after_writes` to let that many row writes through first.
    #[derive(Default)]
    pub struct MemoryStore {
        pub messages: Mutex<Vec<StoredMessage>>,
        pub contacts: Mutex<Vec<NewContact>>,
        pub fail: std::sync::atomic::AtomicBool,
        pub fail_after_writes: Mutex<Option<usize>>,
        writes: std::sync::atomic::AtomicUsize,
    }

    impl MemoryStore {
        fn check(&self) -> Result<(), StoreError> {
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(StoreError::Database(sqlx::Error::PoolClosed));
            }
            Ok(())
        }

        fn check_write(&self) -> Result<(), StoreError> {
            self.check()?;
            let done = self.writes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            match *self.fail_after_writes.lock().unwrap() {
                Some(limit) if done >= limit => Err(StoreError::Database(sqlx::Error::PoolClosed)),
                _ => Ok(()),
            }
        }

        fn row(session_id: &str, role: Role, content: &str) -> StoredMessage {
            StoredMessage {
                session_id: session_id.to_string(),
                role,
                content: content.to_string(),
                created_at: OffsetDateTime::now_utc(),
            }
        }

        pub fn session(&self, session_id: &str) -> Vec<(Role, String)> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.session_id == session_id)
                .map(|m| (m.role, m.content.clone()))
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl Store for MemoryStore {
        async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<(), StoreError> {
            self.check_write()?;
            self.messages.lock().unwrap().push(Self::row(session_id, role, content));
            Ok(())
        }

        async fn save_exchange(&self, session_id: &str, user: &str, assistant: &str) -> Result<(), StoreError> {
            self.check_write()?;
            self.check_write()?;
            self.messages.lock().unwrap().extend([
                Self::row(session_id, Role::User, user),
                Self::row(session_id, Role::Assistant, assistant),
            ]);
            Ok(())
        }

        async fn recent_messages(&self, session_id: &str, limit: i64) -> Result<Vec<StoredMessage>, StoreError> {
            self.check()?;
            let all: Vec<_> = self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.session_id == session_id)
                .cloned()
                .collect();
            let keep = usize::try_from(limit).unwrap_or(0).min(all.len());
            Ok(all[all.len() - keep..].to_vec())
        }

        async fn save_contact(&self, contact: &NewContact) -> Result<(), StoreError> {
            self.check()?;
            self.contacts.lock().unwrap().push(contact.clone());
            Ok(())
        }
    }

    /// Scripted [`LlmChat`]: pops one result per call and records every
    /// request. Answers `"done"` once the script runs out.
    #[derive(Default)]
    pub struct MockLlm {
        script: Mutex<VecDeque<Result<ChatResponse, LlmError>>>,
        pub calls: Mutex<Vec<(String, Vec<Message>)>>,
    }

    impl MockLlm {
        pub fn new(script: Vec<Result<ChatResponse, LlmError>>) -> Self {
            Self { script: Mutex::new(script.into()), calls: Mutex::new(Vec::new()) }
        }

        pub fn models_called(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
        }
    }

    #[async_trait::async_trait]
    impl crate::llm::LlmChat for MockLlm {
        async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((request.model.to_string(), request.messages.to_vec()));
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(reply("done")))
        }
    }

    pub fn reply(text: &str) -> ChatResponse {
        ChatResponse { text: text.into(), model: "mock".into(), input_tokens: 0, output_tokens: 0 }
    }

    pub fn status(code: u16) -> LlmError {
        LlmError::ApiResponse { status: code, body: format!("status {code}") }
    }

    /// Three models, two attempts each, no backoff.
    pub fn fast_chat_settings() -> ChatSettings {
        ChatSettings {
            models: vec!["primary".into(), "fallback-a".into(), "fallback-b".into()],
            backoff: Duration::ZERO,
            max_retries: 2,
            ..ChatSettings::default()
        }
    }

    pub fn test_app_state_with(store: Arc<MemoryStore>, llm: Option<Arc<MockLlm>>) -> AppState {
        AppState::new(
            store,
            llm.map(|l| l as Arc<dyn LlmChat>),
            fast_chat_settings(),
            Resume::embedded().unwrap(),
            RateLimitConfig::default(),
        )
    }

    /// `AppState` with an empty memory store and no LLM.
    pub fn test_app_state() -> AppState {
        test_app_state_with(Arc::new(MemoryStore::default()), None)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
