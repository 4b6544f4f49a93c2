//! CLI command implementations.

pub mod import;
pub mod list;
pub mod migrate;

use sqlx::SqlitePool;

use cafe_directory_web::config::WebConfig;
use cafe_directory_web::db;

/// Load configuration and open the configured database.
async fn connect() -> Result<SqlitePool, Box<dyn std::error::Error>> {
    let config = WebConfig::from_env()?;

    tracing::info!(database_url = %config.database_url, "Connecting to database...");
    let pool = db::create_pool(&config).await?;
    Ok(pool)
}
