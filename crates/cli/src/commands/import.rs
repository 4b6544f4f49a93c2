//! Bulk import of cafes from a YAML file.
//!
//! # File format
//!
//! A top-level list of cafes. Flags default to `false` and the price may be
//! omitted; quote prices so YAML keeps them as text.
//!
//! ```yaml
//! - name: Brew Lab
//!   map_url: https://maps.example/1
//!   img_url: https://img.example/1
//!   location: Downtown
//!   seats: 10-20
//!   has_toilet: true
//!   has_wifi: true
//!   coffee_price: "3.50"
//! ```
//!
//! Every entry goes through the same validation as the add form. The file is
//! rejected as a whole, before anything is written, if any entry fails.

use std::path::Path;

use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info, warn};

use cafe_directory_web::db::{CafeRepository, RepositoryError};
use cafe_directory_web::forms::{AddCafeForm, Checkbox, FieldErrors};
use cafe_directory_web::models::NewCafe;

/// Errors that can occur during import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{} invalid entries found", .0.len())]
    Invalid(Vec<InvalidEntry>),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// An import entry that failed validation.
#[derive(Debug)]
pub struct InvalidEntry {
    /// One-based position in the file.
    pub position: usize,
    pub name: String,
    pub errors: FieldErrors,
}

/// One cafe as written in an import file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    #[serde(default)]
    pub has_toilet: bool,
    #[serde(default)]
    pub has_wifi: bool,
    #[serde(default)]
    pub has_sockets: bool,
    #[serde(default)]
    pub can_take_calls: bool,
    #[serde(default)]
    pub coffee_price: Option<String>,
}

impl SeedCafe {
    fn to_form(&self) -> AddCafeForm {
        AddCafeForm {
            cafe_name: self.name.clone(),
            map_url: self.map_url.clone(),
            img_url: self.img_url.clone(),
            location: self.location.clone(),
            seats: self.seats.clone(),
            has_toilet: Checkbox::from(self.has_toilet),
            has_wifi: Checkbox::from(self.has_wifi),
            has_sockets: Checkbox::from(self.has_sockets),
            can_take_calls: Checkbox::from(self.can_take_calls),
            coffee_price: self.coffee_price.clone().unwrap_or_default(),
        }
    }
}

/// Result of an import run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Parse an import file and validate every entry.
///
/// # Errors
///
/// Returns `ImportError::Yaml` if the content is not a list of cafes, and
/// `ImportError::Invalid` listing every entry that fails validation.
pub fn parse(content: &str) -> Result<Vec<NewCafe>, ImportError> {
    let entries: Vec<SeedCafe> = serde_yaml::from_str(content)?;

    let mut cafes = Vec::with_capacity(entries.len());
    let mut failures = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match entry.to_form().validate() {
            Ok(cafe) => cafes.push(cafe),
            Err(errors) => failures.push(InvalidEntry {
                position: index + 1,
                name: entry.name.clone(),
                errors,
            }),
        }
    }

    if failures.is_empty() {
        Ok(cafes)
    } else {
        Err(ImportError::Invalid(failures))
    }
}

/// Insert validated cafes in file order.
///
/// # Errors
///
/// Returns `ImportError::Repository` on the first duplicate name unless
/// `skip_existing` is set, and on any other database error.
pub async fn insert_all(
    pool: &SqlitePool,
    cafes: &[NewCafe],
    skip_existing: bool,
) -> Result<ImportSummary, ImportError> {
    let repo = CafeRepository::new(pool);
    let mut summary = ImportSummary::default();

    for cafe in cafes {
        match repo.create(cafe).await {
            Ok(created) => {
                info!(cafe_id = %created.id, name = %created.name, "Imported cafe");
                summary.inserted += 1;
            }
            Err(RepositoryError::Conflict(message)) if skip_existing => {
                warn!(name = %cafe.name, "Skipping: {message}");
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}

/// Import cafes from a YAML file into the configured database.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any entry is
/// invalid, or a database operation fails.
pub async fn run(path: &Path, skip_existing: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %path.display(), "Loading cafes from file");

    // Read and validate before connecting to the database
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(ImportError::from)?;
    let cafes = match parse(&content) {
        Ok(cafes) => cafes,
        Err(ImportError::Invalid(failures)) => {
            error!("Validation failed:");
            for entry in &failures {
                error!("  - entry {} ({}): {}", entry.position, entry.name, entry.errors);
            }
            return Err(ImportError::Invalid(failures).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(cafes = cafes.len(), "File validated successfully");

    let pool = super::connect().await?;
    let summary = insert_all(&pool, &cafes, skip_existing).await?;

    info!("Import complete!");
    info!("  Cafes inserted: {}", summary.inserted);
    info!("  Cafes skipped (already exist): {}", summary.skipped);

    Ok(())
}
