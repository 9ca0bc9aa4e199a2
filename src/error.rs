//! Error codes and the JSON error body every endpoint returns.
//!
//! DESIGN
//! ======
//! Each service owns a `thiserror` enum. Implementing [`ErrorCode`] gives it
//! a grepable `E_*` code and a retryable flag; the route layer pairs it with
//! a status and renders `{ "detail", "code", "retryable" }`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Wire shape of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
    pub retryable: bool,
}

impl ErrorBody {
    #[must_use]
    pub fn from_error(err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { detail: err.to_string(), code: err.error_code().to_string(), retryable: err.retryable() }
    }
}

/// A status paired with the body rendered for it.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { status, body: ErrorBody::from_error(err) }
    }
}

/// Malformed request bodies: bad JSON, missing fields, wrong content type.
impl ErrorCode for JsonRejection {
    fn error_code(&self) -> &'static str {
        "E_BAD_REQUEST"
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), &rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
