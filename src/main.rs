mod db;
mod env;
mod error;
mod llm;
mod rate_limit;
mod resume;
mod routes;
mod services;
mod state;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: .env not loaded: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    let resume_path = env::env_string("RESUME_PATH").map(PathBuf::from);
    let resume = resume::Resume::load(resume_path.as_deref()).expect("resume load failed");
    tracing::info!(owner = resume.owner().unwrap_or("unknown"), "resume loaded");

    // Chat is disabled (500 on every request) when no API key is set.
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(base_url = client.base_url(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; chat disabled");
            None
        }
    };

    let chat = services::chat::ChatSettings::from_env();
    tracing::info!(models = ?chat.models, "chat model order");

    let state = state::AppState::new(
        Arc::new(store::PgStore::new(pool)),
        llm,
        chat,
        resume,
        rate_limit::RateLimitConfig::from_env(),
    );

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "folio listening");
    axum::serve(listener, app).await.expect("server failed");
}
