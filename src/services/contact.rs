//! Contact service — validate and record "get in touch" submissions.
//!
//! Delivery (mail, notifications) is out of band; a stored row is the
//! whole contract.

use tracing::info;

use crate::error::ErrorCode;
use crate::store::{NewContact, StoreError};
use crate::state::AppState;

pub const SUCCESS_MESSAGE: &str = "Message received! I'll get back to you soon.";

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("name, email and message are required")]
    MissingField,
    #[error("email address looks invalid")]
    InvalidEmail,
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ErrorCode for ContactError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField => "E_MISSING_FIELD",
            Self::InvalidEmail => "E_INVALID_EMAIL",
            Self::Store(_) => "E_STORE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Store(e) if e.retryable())
    }
}

/// Trim and check a raw submission.
///
/// # Errors
///
/// [`ContactError::MissingField`] if any field is blank,
/// [`ContactError::InvalidEmail`] if the email has no `@`.
pub fn validate(name: &str, email: &str, message: &str) -> Result<NewContact, ContactError> {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ContactError::MissingField);
    }
    if !email.contains('@') {
        return Err(ContactError::InvalidEmail);
    }
    Ok(NewContact { name: name.to_string(), email: email.to_string(), message: message.to_string() })
}

/// Validate and persist a submission.
///
/// # Errors
///
/// Validation failures or a storage error.
pub async fn submit(state: &AppState, name: &str, email: &str, message: &str) -> Result<(), ContactError> {
    let contact = validate(name, email, message)?;
    state.store.save_contact(&contact).await?;
    info!(message_len = contact.message.len(), "contact: submission stored");
    Ok(())
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
