//! Shopping list route handlers.
//!
//! The shopping list is personal: every operation acts on the current user's
//! own membership rows and nobody else's. Add and remove are idempotent.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::instrument;

use greenbasket_core::ItemId;

use crate::db::{ItemRepository, ShoppingListRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::routes::items::ItemView;
use crate::state::AppState;

/// Shopping list page template.
#[derive(Template, WebTemplate)]
#[template(path = "shopping_list.html")]
pub struct ShoppingListTemplate {
    pub items: Vec<ItemView>,
    pub current_user: Option<CurrentUser>,
}

/// Display the current user's shopping list (possibly empty).
#[instrument(skip(state, current_user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
) -> Result<ShoppingListTemplate> {
    let items = ShoppingListRepository::new(state.pool())
        .items_for(current_user.id)
        .await?
        .iter()
        .map(ItemView::from)
        .collect();

    Ok(ShoppingListTemplate {
        items,
        current_user: Some(current_user),
    })
}

/// Look up an item, answering 404 when the id does not exist.
async fn load_item_id(state: &AppState, item_id: i32) -> Result<ItemId> {
    let item = ItemRepository::new(state.pool())
        .get(ItemId::new(item_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {item_id}")))?;

    Ok(item.id)
}

/// Add an item to the current user's shopping list.
///
/// Idempotent: repeating the call leaves the list unchanged.
#[instrument(skip(state, current_user))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(item_id): Path<i32>,
) -> Result<Redirect> {
    let item_id = load_item_id(&state, item_id).await?;

    ShoppingListRepository::new(state.pool())
        .add(current_user.id, item_id)
        .await?;

    Ok(Redirect::to(&format!("/item/{item_id}")))
}

/// Remove an item from the current user's shopping list.
///
/// A no-op when the item is not on the list.
#[instrument(skip(state, current_user))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(item_id): Path<i32>,
) -> Result<Redirect> {
    let item_id = load_item_id(&state, item_id).await?;

    ShoppingListRepository::new(state.pool())
        .remove(current_user.id, item_id)
        .await?;

    Ok(Redirect::to(&format!("/item/{item_id}")))
}
