//! Catalog domain types: stores and their items.

use chrono::{DateTime, Utc};
use url::Url;

use greenbasket_core::{ItemCategory, ItemId, StoreId, UserId};

/// A grocery store in the catalog.
#[derive(Debug, Clone)]
pub struct GroceryStore {
    /// Unique store ID.
    pub id: StoreId,
    /// Store title, at most 80 characters.
    pub title: String,
    /// Street address, at most 200 characters.
    pub address: String,
    /// The user who created the store. `None` for rows that predate
    /// accounts or whose creator was removed.
    pub created_by: Option<UserId>,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
}

/// A grocery item, belonging to exactly one store.
#[derive(Debug, Clone)]
pub struct GroceryItem {
    /// Unique item ID.
    pub id: ItemId,
    /// Item name, at most 80 characters.
    pub name: String,
    /// Price in dollars. Displayed with two decimals; negative values are
    /// not rejected by the schema.
    pub price: f64,
    /// Category from the closed enumeration.
    pub category: ItemCategory,
    /// Optional product photo.
    pub photo_url: Option<Url>,
    /// The store this item belongs to.
    pub store_id: StoreId,
    /// The user who created the item, if known.
    pub created_by: Option<UserId>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}
