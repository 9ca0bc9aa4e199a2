//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup creates the shared SQLx pool here and applies the chat/contact
//! schema before the router starts accepting traffic.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::env::env_parse;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS))
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
