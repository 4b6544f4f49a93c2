//! Cafe directory CLI - migrations and bulk data management.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! cafe-cli migrate
//!
//! # Print every stored cafe
//! cafe-cli list
//!
//! # Bulk-create cafes from a YAML file
//! cafe-cli import cafes.yaml --skip-existing
//! ```
//!
//! All commands read the database location from `CAFE_DATABASE_URL`
//! (or `DATABASE_URL`), loading `.env` when present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "cafe-cli")]
#[command(author, version, about = "Cafe directory CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// List every stored cafe
    List,
    /// Import cafes from a YAML file
    Import {
        /// Path to the YAML file (a list of cafes)
        file: PathBuf,

        /// Skip cafes whose name already exists instead of aborting
        #[arg(long)]
        skip_existing: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env first so it can set RUST_LOG
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Build the log filter from `RUST_LOG`, falling back to info level.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::List => commands::list::run().await?,
        Commands::Import {
            file,
            skip_existing,
        } => commands::import::run(&file, skip_existing).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_invalid_directive_falls_back_to_info() {
        assert_eq!(
            log_filter(Some("cafe=notalevel")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_log_filter_respects_rust_log() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_cli_parses_import_flags() {
        let cli = Cli::try_parse_from(["cafe-cli", "import", "cafes.yaml", "--skip-existing"])
            .unwrap_or_else(|e| panic!("{e}"));

        assert!(matches!(
            cli.command,
            Commands::Import { ref file, skip_existing: true } if file == &PathBuf::from("cafes.yaml")
        ));
    }
}
