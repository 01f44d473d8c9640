//! Shopping list repository.
//!
//! The shopping list is a pure many-to-many association between users and
//! grocery items. Membership is at-most-once per pair: adding is idempotent
//! and removing an absent entry is a no-op.

use sqlx::PgPool;

use greenbasket_core::{ItemId, UserId};

use super::RepositoryError;
use super::items::ItemRow;
use crate::models::GroceryItem;

/// Repository for shopping list membership operations.
pub struct ShoppingListRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShoppingListRepository<'a> {
    /// Create a new shopping list repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether the item is on the user's shopping list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn contains(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS (
                SELECT 1 FROM shopping_list_items
                WHERE user_id = $1 AND item_id = $2
            )
            ",
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Add an item to the user's shopping list.
    ///
    /// Idempotent: adding an item that is already present changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// foreign-key violation on a nonexistent user or item).
    pub async fn add(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shopping_list_items (user_id, item_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove an item from the user's shopping list.
    ///
    /// A no-op when the item is not on the list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM shopping_list_items
            WHERE user_id = $1 AND item_id = $2
            ",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// All items on the user's shopping list, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn items_for(&self, user_id: UserId) -> Result<Vec<GroceryItem>, RepositoryError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r"
            SELECT i.id, i.name, i.price, i.category, i.photo_url,
                   i.store_id, i.created_by, i.created_at
            FROM grocery_items i
            JOIN shopping_list_items s ON s.item_id = i.id
            WHERE s.user_id = $1
            ORDER BY i.name ASC, i.id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(GroceryItem::try_from).collect()
    }
}
