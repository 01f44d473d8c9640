//! Item repository for database operations.
//!
//! Stored category and photo-URL values are re-validated on the way out of
//! the database; rows that fail validation surface as
//! [`RepositoryError::DataCorruption`] instead of panicking.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use url::Url;

use greenbasket_core::{ItemCategory, ItemId, StoreId, UserId};

use super::RepositoryError;
use crate::models::GroceryItem;

#[derive(sqlx::FromRow)]
pub(super) struct ItemRow {
    id: ItemId,
    name: String,
    price: f64,
    category: String,
    photo_url: Option<String>,
    store_id: StoreId,
    created_by: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for GroceryItem {
    type Error = RepositoryError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let category: ItemCategory = row.category.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category in database: {e}"))
        })?;

        let photo_url = row
            .photo_url
            .map(|raw| {
                Url::parse(&raw).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid photo URL in database: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price: row.price,
            category,
            photo_url,
            store_id: row.store_id,
            created_by: row.created_by,
            created_at: row.created_at,
        })
    }
}

const ITEM_COLUMNS: &str = "id, name, price, category, photo_url, store_id, created_by, created_at";

/// Repository for grocery item database operations.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// foreign-key violation on a nonexistent store).
    pub async fn create(
        &self,
        name: &str,
        price: f64,
        category: ItemCategory,
        photo_url: Option<&Url>,
        store_id: StoreId,
        created_by: Option<UserId>,
    ) -> Result<GroceryItem, RepositoryError> {
        let row: ItemRow = sqlx::query_as(&format!(
            r"
            INSERT INTO grocery_items (name, price, category, photo_url, store_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ITEM_COLUMNS}
            "
        ))
        .bind(name)
        .bind(price)
        .bind(category.value())
        .bind(photo_url.map(Url::as_str))
        .bind(store_id)
        .bind(created_by)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get an item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get(&self, id: ItemId) -> Result<Option<GroceryItem>, RepositoryError> {
        let row: Option<ItemRow> = sqlx::query_as(&format!(
            r"
            SELECT {ITEM_COLUMNS}
            FROM grocery_items
            WHERE id = $1
            "
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(GroceryItem::try_from).transpose()
    }

    /// Get all items belonging to a store, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_all_for_store(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<GroceryItem>, RepositoryError> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            r"
            SELECT {ITEM_COLUMNS}
            FROM grocery_items
            WHERE store_id = $1
            ORDER BY name ASC, id ASC
            "
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(GroceryItem::try_from).collect()
    }

    /// Update an item's fields in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ItemId,
        name: &str,
        price: f64,
        category: ItemCategory,
        photo_url: Option<&Url>,
        store_id: StoreId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE grocery_items
            SET name = $1, price = $2, category = $3, photo_url = $4, store_id = $5
            WHERE id = $6
            ",
        )
        .bind(name)
        .bind(price)
        .bind(category.value())
        .bind(photo_url.map(Url::as_str))
        .bind(store_id)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
