//! Store repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use greenbasket_core::{StoreId, UserId};

use super::RepositoryError;
use crate::models::GroceryStore;

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: StoreId,
    title: String,
    address: String,
    created_by: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl From<StoreRow> for GroceryStore {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            address: row.address,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

/// Repository for grocery store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        title: &str,
        address: &str,
        created_by: Option<UserId>,
    ) -> Result<GroceryStore, RepositoryError> {
        let row: StoreRow = sqlx::query_as(
            r"
            INSERT INTO grocery_stores (title, address, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, title, address, created_by, created_at
            ",
        )
        .bind(title)
        .bind(address)
        .bind(created_by)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get a store by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: StoreId) -> Result<Option<GroceryStore>, RepositoryError> {
        let row: Option<StoreRow> = sqlx::query_as(
            r"
            SELECT id, title, address, created_by, created_at
            FROM grocery_stores
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(GroceryStore::from))
    }

    /// Get all stores, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<GroceryStore>, RepositoryError> {
        let rows: Vec<StoreRow> = sqlx::query_as(
            r"
            SELECT id, title, address, created_by, created_at
            FROM grocery_stores
            ORDER BY title ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(GroceryStore::from).collect())
    }

    /// Update a store's title and address in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: StoreId,
        title: &str,
        address: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE grocery_stores
            SET title = $1, address = $2
            WHERE id = $3
            ",
        )
        .bind(title)
        .bind(address)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
