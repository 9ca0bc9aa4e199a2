//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API under `/api` and serves the static portfolio site
//! (including the backdrop wasm bundle) from `WEBSITE_DIR` for every other
//! path.

pub mod chat;
pub mod contact;
pub mod resume;

use std::path::PathBuf;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/contact", post(contact::contact))
        .route("/api/resume", get(resume::resume))
        .route("/api/health", get(resume::health))
        .route("/healthz", get(resume::healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the path to the portfolio website directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("website"))
}

/// API routes plus the static site at `/`.
pub fn app(state: AppState) -> Router {
    let website = ServeDir::new(website_dir()).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(website)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
