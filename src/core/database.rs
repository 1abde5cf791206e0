use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Connection URL without credentials, for logs
fn redacted_url(url: &str) -> &str {
    url.rsplit_once('@').map(|(_, host)| host).unwrap_or("***")
}

/// Opens the Postgres pool backing the contributor store
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        "Connecting to database {} (max_connections={}, min_connections={})",
        redacted_url(&config.url),
        config.max_connections,
        config.min_connections
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
        .inspect_err(|e| tracing::error!("Failed to connect to database: {:?}", e))
}
