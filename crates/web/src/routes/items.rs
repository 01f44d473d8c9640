//! Item route handlers.
//!
//! Items always belong to exactly one store; the store select on the form is
//! populated from an explicit list of stores resolved by the handler, and the
//! same list backs validation. The detail page also shows whether the item is
//! on the current user's shopping list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use greenbasket_core::{ItemCategory, ItemId};

use crate::db::{ItemRepository, ShoppingListRepository, StoreRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::forms::{FieldErrors, ItemForm, StoreOption};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, GroceryItem};
use crate::routes::stores::MessageQuery;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Item display data for templates.
#[derive(Clone)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: &'static str,
    pub photo_url: Option<String>,
    pub store_id: String,
}

/// Format a price for display.
pub(crate) fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

impl From<&GroceryItem> for ItemView {
    fn from(item: &GroceryItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            price: format_price(item.price),
            category: item.category.label(),
            photo_url: item.photo_url.as_ref().map(ToString::to_string),
            store_id: item.store_id.to_string(),
        }
    }
}

/// Option row for the category select.
pub struct CategoryChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Build the category select options, marking the submitted value.
fn category_choices(selected: &str) -> Vec<CategoryChoice> {
    ItemCategory::choices()
        .into_iter()
        .map(|(value, label)| CategoryChoice {
            value,
            label,
            selected: value == selected,
        })
        .collect()
}

/// Option row for the store select.
pub struct StoreChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Build the store select options, marking the submitted value.
fn store_choices(stores: &[StoreOption], selected: &str) -> Vec<StoreChoice> {
    stores
        .iter()
        .map(|store| {
            let value = store.id.to_string();
            StoreChoice {
                selected: value == selected,
                value,
                label: store.title.clone(),
            }
        })
        .collect()
}

/// Map a `?success=` code to the notice shown on the detail page.
fn notice_for(code: &str) -> Option<String> {
    match code {
        "created" => Some("New item was created successfully.".to_owned()),
        "updated" => Some("Item was edited successfully.".to_owned()),
        _ => None,
    }
}

// =============================================================================
// Templates
// =============================================================================

/// New item page template.
#[derive(Template, WebTemplate)]
#[template(path = "items/new.html")]
pub struct NewItemTemplate {
    pub form: ItemForm,
    pub errors: FieldErrors,
    pub categories: Vec<CategoryChoice>,
    pub stores: Vec<StoreChoice>,
    pub current_user: Option<CurrentUser>,
}

impl NewItemTemplate {
    fn render(form: ItemForm, errors: FieldErrors, stores: &[StoreOption], user: CurrentUser) -> Self {
        Self {
            categories: category_choices(&form.category),
            stores: store_choices(stores, &form.store),
            form,
            errors,
            current_user: Some(user),
        }
    }
}

/// Item detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "items/detail.html")]
pub struct ItemDetailTemplate {
    pub item: ItemView,
    pub store_title: Option<String>,
    pub on_shopping_list: bool,
    pub created_by: Option<String>,
    pub form: ItemForm,
    pub errors: FieldErrors,
    pub categories: Vec<CategoryChoice>,
    pub stores: Vec<StoreChoice>,
    pub notice: Option<String>,
    pub current_user: Option<CurrentUser>,
}

impl ItemDetailTemplate {
    /// Build the detail page context for a loaded item.
    async fn load(
        state: &AppState,
        item: &GroceryItem,
        store_options: Vec<StoreOption>,
        current_user: CurrentUser,
    ) -> Result<Self> {
        let on_shopping_list = ShoppingListRepository::new(state.pool())
            .contains(current_user.id, item.id)
            .await?;

        let created_by = match item.created_by {
            Some(user_id) => UserRepository::new(state.pool())
                .get_by_id(user_id)
                .await?
                .map(|u| u.username.to_string()),
            None => None,
        };

        let store_title = store_options
            .iter()
            .find(|s| s.id == item.store_id)
            .map(|s| s.title.clone());

        let form = ItemForm::from_item(item);

        Ok(Self {
            item: ItemView::from(item),
            store_title,
            on_shopping_list,
            created_by,
            categories: category_choices(&form.category),
            stores: store_choices(&store_options, &form.store),
            form,
            errors: FieldErrors::new(),
            notice: None,
            current_user: Some(current_user),
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Resolve the list of stores the item form may reference.
async fn selectable_stores(state: &AppState) -> Result<Vec<StoreOption>> {
    let stores = StoreRepository::new(state.pool()).get_all().await?;
    Ok(stores.iter().map(StoreOption::from).collect())
}

/// Display the blank new-item form.
#[instrument(skip(state, current_user))]
pub async fn new_item_page(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
) -> Result<NewItemTemplate> {
    let stores = selectable_stores(&state).await?;

    // Category defaults to Other on a fresh form
    let form = ItemForm {
        category: ItemCategory::default().value().to_owned(),
        ..ItemForm::default()
    };

    Ok(NewItemTemplate::render(
        form,
        FieldErrors::new(),
        &stores,
        current_user,
    ))
}

/// Handle new-item form submission.
#[instrument(skip(state, current_user, form))]
pub async fn create_item(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Form(form): Form<ItemForm>,
) -> Result<Response> {
    let stores = selectable_stores(&state).await?;

    match form.validate(&stores) {
        Ok(valid) => {
            let item = ItemRepository::new(state.pool())
                .create(
                    &valid.name,
                    valid.price,
                    valid.category,
                    valid.photo_url.as_ref(),
                    valid.store_id,
                    Some(current_user.id),
                )
                .await?;

            tracing::info!(item_id = %item.id, "item created");
            Ok(Redirect::to(&format!("/item/{}?success=created", item.id)).into_response())
        }
        Err(errors) => {
            Ok(NewItemTemplate::render(form, errors, &stores, current_user).into_response())
        }
    }
}

/// Display an item with its edit form and shopping-list status.
///
/// Responds 404 when the item id does not exist.
#[instrument(skip(state, current_user))]
pub async fn item_detail_page(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(item_id): Path<i32>,
    Query(query): Query<MessageQuery>,
) -> Result<ItemDetailTemplate> {
    let item = ItemRepository::new(state.pool())
        .get(ItemId::new(item_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {item_id}")))?;

    let stores = selectable_stores(&state).await?;

    let mut page = ItemDetailTemplate::load(&state, &item, stores, current_user).await?;
    page.notice = query.success.as_deref().and_then(notice_for);

    Ok(page)
}

/// Apply edits to an existing item.
///
/// Responds 404 when the item id does not exist; on validation failure the
/// detail page is re-rendered with the submitted values and field errors.
#[instrument(skip(state, current_user, form))]
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(item_id): Path<i32>,
    Form(form): Form<ItemForm>,
) -> Result<Response> {
    let items = ItemRepository::new(state.pool());
    let item = items
        .get(ItemId::new(item_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {item_id}")))?;

    let stores = selectable_stores(&state).await?;

    match form.validate(&stores) {
        Ok(valid) => {
            items
                .update(
                    item.id,
                    &valid.name,
                    valid.price,
                    valid.category,
                    valid.photo_url.as_ref(),
                    valid.store_id,
                )
                .await?;

            tracing::info!(item_id = %item.id, "item updated");
            Ok(Redirect::to(&format!("/item/{}?success=updated", item.id)).into_response())
        }
        Err(errors) => {
            let mut page =
                ItemDetailTemplate::load(&state, &item, stores.clone(), current_user).await?;
            page.categories = category_choices(&form.category);
            page.stores = store_choices(&stores, &form.store);
            page.form = form;
            page.errors = errors;
            Ok(page.into_response())
        }
    }
}
