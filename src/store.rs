//! Persistence for chat history and contact submissions.
//!
//! DESIGN
//! ======
//! Services talk to an async [`Store`] trait so they can be exercised
//! against an in-memory store in tests. [`PgStore`] is the production
//! implementation over the shared `PgPool`.

use sqlx::PgPool;
use time::OffsetDateTime;

use crate::llm::types::Role;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl crate::error::ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "E_DATABASE",
            Self::Corrupt(_) => "E_CORRUPT_ROW",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)))
    }
}

/// A persisted chat turn. Mirrors the `chat_messages` table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub session_id: String,
    pub role: Role,
    pub content: String,
    pub created_at: OffsetDateTime,
}

/// A contact form submission. Mirrors the `contact_submissions` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

// =============================================================================
// STORE TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Append one message to a session's history.
    async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<(), StoreError>;

    /// Append a user turn and its reply together. Either both are stored or
    /// neither is.
    async fn save_exchange(&self, session_id: &str, user: &str, assistant: &str) -> Result<(), StoreError>;

    /// The `limit` most recent messages of a session, oldest first.
    async fn recent_messages(&self, session_id: &str, limit: i64) -> Result<Vec<StoredMessage>, StoreError>;

    /// Record a contact submission.
    async fn save_contact(&self, contact: &NewContact) -> Result<(), StoreError>;
}

// =============================================================================
// POSTGRES
// =============================================================================

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Store for PgStore {
    async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO chat_messages (session_id, role, content) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(role.as_str())
            .bind(content)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn save_exchange(&self, session_id: &str, user: &str, assistant: &str) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for (role, content) in [(Role::User, user), (Role::Assistant, assistant)] {
            sqlx::query("INSERT INTO chat_messages (session_id, role, content) VALUES ($1, $2, $3)")
                .bind(session_id)
                .bind(role.as_str())
                .bind(content)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn recent_messages(&self, session_id: &str, limit: i64) -> Result<Vec<StoredMessage>, StoreError> {
        // Take the tail newest-first, then re-order chronologically.
        let rows = sqlx::query_as::<_, (String, String, OffsetDateTime)>(
            "SELECT sub.role, sub.content, sub.created_at FROM (
                 SELECT id, role, content, created_at
                 FROM chat_messages
                 WHERE session_id = $1
                 ORDER BY id DESC
                 LIMIT $2
             ) sub
             ORDER BY sub.id ASC",
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(role, content, created_at)| {
                let role = Role::parse_stored(&role).ok_or_else(|| StoreError::Corrupt(format!("role {role:?}")))?;
                Ok(StoredMessage { session_id: session_id.to_string(), role, content, created_at })
            })
            .collect()
    }

    async fn save_contact(&self, contact: &NewContact) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO contact_submissions (name, email, message) VALUES ($1, $2, $3)")
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(&contact.message)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(all(test, feature = "live-db-tests"))]
#[path = "store_test.rs"]
mod tests;
