//! `POST /api/chat`.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::chat::{self, ChatError};
use crate::state::AppState;

fn default_session() -> String {
    "default".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_session")]
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
}

pub(crate) fn chat_error_to_status(err: &ChatError) -> StatusCode {
    match err {
        ChatError::NotConfigured | ChatError::Llm(_) | ChatError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ChatError::RateLimited(_) | ChatError::Exhausted { .. } => StatusCode::TOO_MANY_REQUESTS,
        ChatError::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(req) = payload?;
    match chat::handle_message(&state, &req.session_id, &req.message).await {
        Ok(response) => Ok(Json(ChatReply { response, session_id: req.session_id })),
        Err(e) => {
            tracing::warn!(session_id = %req.session_id, error = %e, "chat request failed");
            Err(ApiError::new(chat_error_to_status(&e), &e))
        }
    }
}
