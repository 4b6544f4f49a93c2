//! List stored cafes.

use tracing::info;

use cafe_directory_web::db::CafeRepository;

/// Log one line per stored cafe.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or queried.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let cafes = CafeRepository::new(&pool).list().await?;

    info!("Cafes: {}", cafes.len());
    for cafe in &cafes {
        info!(
            "  [{}] {} ({}, seats {}) wifi={} sockets={} toilet={} calls={} price={}",
            cafe.id,
            cafe.name,
            cafe.location,
            cafe.seats,
            cafe.has_wifi,
            cafe.has_sockets,
            cafe.has_toilet,
            cafe.can_take_calls,
            cafe.coffee_price.as_deref().unwrap_or("n/a"),
        );
    }

    Ok(())
}
