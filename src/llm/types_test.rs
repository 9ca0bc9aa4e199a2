use super::*;
use crate::error::ErrorCode;

#[test]
fn role_serializes_lowercase() {
    let msg = Message::new(Role::Assistant, "hi");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json, serde_json::json!({"role": "assistant", "content": "hi"}));
}

#[test]
fn stored_roles_exclude_system() {
    assert_eq!(Role::parse_stored("user"), Some(Role::User));
    assert_eq!(Role::parse_stored("assistant"), Some(Role::Assistant));
    assert_eq!(Role::parse_stored("system"), None);
    assert_eq!(Role::parse_stored("USER"), None);
}

#[test]
fn only_429_counts_as_rate_limited() {
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.is_rate_limited());
    assert!(!LlmError::ApiResponse { status: 503, body: String::new() }.is_rate_limited());
    assert!(!LlmError::Timeout.is_rate_limited());
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(LlmError::Timeout.error_code(), "E_API_TIMEOUT");
    assert_eq!(LlmError::ApiParse("x".into()).error_code(), "E_API_PARSE");
    assert_eq!(LlmError::MissingApiKey { var: "K".into() }.error_code(), "E_MISSING_API_KEY");
}

#[test]
fn retryable_covers_transient_failures() {
    assert!(LlmError::Timeout.retryable());
    assert!(LlmError::ApiRequest("reset".into()).retryable());
    assert!(LlmError::ApiResponse { status: 502, body: String::new() }.retryable());
    assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::ApiParse("bad".into()).retryable());
}

#[test]
fn api_response_display_includes_status_and_body() {
    let err = LlmError::ApiResponse { status: 404, body: "no such model".into() };
    assert_eq!(err.to_string(), "AI service error (404): no such model");
}
