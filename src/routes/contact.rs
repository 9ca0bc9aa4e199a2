//! `POST /api/contact`.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::contact::{self, ContactError, SUCCESS_MESSAGE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactReply {
    pub status: String,
    pub message: String,
}

pub(crate) fn contact_error_to_status(err: &ContactError) -> StatusCode {
    match err {
        ContactError::MissingField | ContactError::InvalidEmail => StatusCode::BAD_REQUEST,
        ContactError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactReply>, ApiError> {
    let Json(req) = payload?;
    contact::submit(&state, &req.name, &req.email, &req.message)
        .await
        .map_err(|e| ApiError::new(contact_error_to_status(&e), &e))?;
    Ok(Json(ContactReply { status: "success".into(), message: SUCCESS_MESSAGE.into() }))
}
