//! Database migration command.
//!
//! Migrations live in `crates/web/migrations/` and are embedded in the web
//! library, so this applies exactly what the server applies on startup.

use cafe_directory_web::db;

/// Apply pending migrations to the configured database.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// opened, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
