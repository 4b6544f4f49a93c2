//! Cafe repository for database operations.
//!
//! Every method is a single auto-committed statement. The unique constraint on
//! `cafe.name` is the only guard against duplicate names; concurrent inserts of
//! the same name race there and the loser gets `RepositoryError::Conflict`.

use sqlx::SqlitePool;

use cafe_directory_core::CafeId;

use super::RepositoryError;
use crate::models::{Cafe, CafeUpdate, NewCafe};

/// Repository for cafe database operations.
pub struct CafeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CafeRepository<'a> {
    /// Create a new cafe repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get every cafe, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Cafe>, RepositoryError> {
        let cafes = sqlx::query_as::<_, Cafe>(
            r"
            SELECT id, name, map_url, img_url, location, seats,
                   has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price
            FROM cafe
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(cafes)
    }

    /// Get a cafe by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CafeId) -> Result<Option<Cafe>, RepositoryError> {
        let cafe = sqlx::query_as::<_, Cafe>(
            r"
            SELECT id, name, map_url, img_url, location, seats,
                   has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price
            FROM cafe
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(cafe)
    }

    /// Count stored cafes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cafe")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a new cafe and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a cafe with the same name exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, cafe: &NewCafe) -> Result<Cafe, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO cafe (name, map_url, img_url, location, seats,
                              has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&cafe.name)
        .bind(cafe.map_url.as_str())
        .bind(cafe.img_url.as_str())
        .bind(&cafe.location)
        .bind(&cafe.seats)
        .bind(cafe.has_toilet)
        .bind(cafe.has_wifi)
        .bind(cafe.has_sockets)
        .bind(cafe.can_take_calls)
        .bind(cafe.coffee_price.map(|price| price.to_string()))
        .execute(self.pool)
        .await
        .map_err(|e| name_conflict(e, &cafe.name))?;

        let id = CafeId::new(result.last_insert_rowid());
        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Change a single column of an existing cafe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cafe doesn't exist.
    /// Returns `RepositoryError::Conflict` if a rename collides with another cafe.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: CafeId, update: &CafeUpdate) -> Result<(), RepositoryError> {
        // Column names come from a closed enum, never from input.
        let sql = format!("UPDATE cafe SET {} = ? WHERE id = ?", update.column());
        let query = sqlx::query(&sql);

        let query = match update {
            CafeUpdate::Name(value) | CafeUpdate::Location(value) | CafeUpdate::Seats(value) => {
                query.bind(value.as_str())
            }
            CafeUpdate::MapUrl(url) | CafeUpdate::ImgUrl(url) => query.bind(url.as_str()),
            CafeUpdate::HasToilet(flag)
            | CafeUpdate::HasWifi(flag)
            | CafeUpdate::HasSockets(flag)
            | CafeUpdate::CanTakeCalls(flag) => query.bind(*flag),
            CafeUpdate::CoffeePrice(price) => query.bind(price.map(|p| p.to_string())),
        };

        let conflicting_name = match update {
            CafeUpdate::Name(name) => name.as_str(),
            _ => "",
        };

        let result = query
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| name_conflict(e, conflicting_name))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a cafe by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cafe doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CafeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cafe WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Map a unique violation on `cafe.name` to `RepositoryError::Conflict`.
fn name_conflict(e: sqlx::Error, name: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("a cafe named '{name}' already exists"));
    }
    RepositoryError::Database(e)
}
