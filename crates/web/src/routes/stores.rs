//! Store route handlers.
//!
//! Creation and editing share the same form; the detail page doubles as the
//! edit page, pre-filled from the stored row. Edits are open to any
//! authenticated user, not just the creator.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use greenbasket_core::StoreId;

use crate::db::{ItemRepository, StoreRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::forms::{FieldErrors, StoreForm};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, GroceryStore};
use crate::routes::items::ItemView;
use crate::state::AppState;

/// Query parameters for success notices on detail pages.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
}

/// Map a `?success=` code to the notice shown on the detail page.
fn notice_for(code: &str) -> Option<String> {
    match code {
        "created" => Some("New store was created successfully.".to_owned()),
        "updated" => Some("Store was edited successfully.".to_owned()),
        _ => None,
    }
}

// =============================================================================
// Templates
// =============================================================================

/// New store page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/new.html")]
pub struct NewStoreTemplate {
    pub form: StoreForm,
    pub errors: FieldErrors,
    pub current_user: Option<CurrentUser>,
}

/// Store detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/detail.html")]
pub struct StoreDetailTemplate {
    pub store_id: String,
    pub title: String,
    pub address: String,
    pub items: Vec<ItemView>,
    pub created_by: Option<String>,
    pub form: StoreForm,
    pub errors: FieldErrors,
    pub notice: Option<String>,
    pub current_user: Option<CurrentUser>,
}

impl StoreDetailTemplate {
    /// Build the detail page context for a loaded store.
    async fn load(
        state: &AppState,
        store: &GroceryStore,
        current_user: CurrentUser,
    ) -> Result<Self> {
        let items = ItemRepository::new(state.pool())
            .get_all_for_store(store.id)
            .await?
            .iter()
            .map(ItemView::from)
            .collect();

        let created_by = match store.created_by {
            Some(user_id) => UserRepository::new(state.pool())
                .get_by_id(user_id)
                .await?
                .map(|u| u.username.to_string()),
            None => None,
        };

        Ok(Self {
            store_id: store.id.to_string(),
            title: store.title.clone(),
            address: store.address.clone(),
            items,
            created_by,
            form: StoreForm::from_store(store),
            errors: FieldErrors::new(),
            notice: None,
            current_user: Some(current_user),
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the blank new-store form.
#[instrument(skip(current_user))]
pub async fn new_store_page(RequireAuth(current_user): RequireAuth) -> NewStoreTemplate {
    NewStoreTemplate {
        form: StoreForm::default(),
        errors: FieldErrors::new(),
        current_user: Some(current_user),
    }
}

/// Handle new-store form submission.
///
/// On success the store is owned by the current user and the browser is
/// redirected to the new detail page; on validation failure the form is
/// re-rendered with field errors.
#[instrument(skip(state, current_user, form))]
pub async fn create_store(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Form(form): Form<StoreForm>,
) -> Result<Response> {
    match form.validate() {
        Ok(valid) => {
            let store = StoreRepository::new(state.pool())
                .create(&valid.title, &valid.address, Some(current_user.id))
                .await?;

            tracing::info!(store_id = %store.id, "store created");
            Ok(Redirect::to(&format!("/store/{}?success=created", store.id)).into_response())
        }
        Err(errors) => Ok(NewStoreTemplate {
            form,
            errors,
            current_user: Some(current_user),
        }
        .into_response()),
    }
}

/// Display a store with its items and a pre-filled edit form.
///
/// Responds 404 when the store id does not exist.
#[instrument(skip(state, current_user))]
pub async fn store_detail_page(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(store_id): Path<i32>,
    Query(query): Query<MessageQuery>,
) -> Result<StoreDetailTemplate> {
    let store = StoreRepository::new(state.pool())
        .get(StoreId::new(store_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("store {store_id}")))?;

    let mut page = StoreDetailTemplate::load(&state, &store, current_user).await?;
    page.notice = query.success.as_deref().and_then(notice_for);

    Ok(page)
}

/// Apply edits to an existing store.
///
/// Responds 404 when the store id does not exist; on validation failure the
/// detail page is re-rendered with the submitted values and field errors.
#[instrument(skip(state, current_user, form))]
pub async fn update_store(
    State(state): State<AppState>,
    RequireAuth(current_user): RequireAuth,
    Path(store_id): Path<i32>,
    Form(form): Form<StoreForm>,
) -> Result<Response> {
    let stores = StoreRepository::new(state.pool());
    let store = stores
        .get(StoreId::new(store_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("store {store_id}")))?;

    match form.validate() {
        Ok(valid) => {
            stores.update(store.id, &valid.title, &valid.address).await?;

            tracing::info!(store_id = %store.id, "store updated");
            Ok(Redirect::to(&format!("/store/{}?success=updated", store.id)).into_response())
        }
        Err(errors) => {
            let mut page = StoreDetailTemplate::load(&state, &store, current_user).await?;
            page.form = form;
            page.errors = errors;
            Ok(page.into_response())
        }
    }
}
