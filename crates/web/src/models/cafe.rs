//! Cafe domain types.
//!
//! `Cafe` is a stored row. `NewCafe` is a validated insert payload, built by
//! the add-cafe form or the CLI importer, never straight from a request body.

use cafe_directory_core::{CafeId, CoffeePrice, WebUrl};

/// A listed cafe (one row of the `cafe` table).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Cafe {
    /// Auto-assigned, never reused.
    pub id: CafeId,
    /// Unique display name.
    pub name: String,
    /// Link to the cafe on a map service.
    pub map_url: String,
    /// Link to a photo of the cafe.
    pub img_url: String,
    /// Neighbourhood or address.
    pub location: String,
    /// Free-form capacity description (e.g. "20-30").
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    /// Price of a regular coffee, two decimal places when set.
    pub coffee_price: Option<String>,
}

/// A validated cafe ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCafe {
    pub name: String,
    pub map_url: WebUrl,
    pub img_url: WebUrl,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<CoffeePrice>,
}

/// A single-column change to an existing cafe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CafeUpdate {
    Name(String),
    MapUrl(WebUrl),
    ImgUrl(WebUrl),
    Location(String),
    Seats(String),
    HasToilet(bool),
    HasWifi(bool),
    HasSockets(bool),
    CanTakeCalls(bool),
    CoffeePrice(Option<CoffeePrice>),
}

impl CafeUpdate {
    /// The column this change writes.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::MapUrl(_) => "map_url",
            Self::ImgUrl(_) => "img_url",
            Self::Location(_) => "location",
            Self::Seats(_) => "seats",
            Self::HasToilet(_) => "has_toilet",
            Self::HasWifi(_) => "has_wifi",
            Self::HasSockets(_) => "has_sockets",
            Self::CanTakeCalls(_) => "can_take_calls",
            Self::CoffeePrice(_) => "coffee_price",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_columns_are_distinct() {
        let updates = [
            CafeUpdate::Name(String::new()),
            CafeUpdate::Location(String::new()),
            CafeUpdate::Seats(String::new()),
            CafeUpdate::HasToilet(true),
            CafeUpdate::HasWifi(true),
            CafeUpdate::HasSockets(true),
            CafeUpdate::CanTakeCalls(true),
            CafeUpdate::CoffeePrice(None),
        ];

        let mut columns: Vec<_> = updates.iter().map(CafeUpdate::column).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), updates.len());
    }

    #[test]
    fn test_location_update_targets_location_column() {
        assert_eq!(
            CafeUpdate::Location("Soho".to_string()).column(),
            "location"
        );
    }
}
