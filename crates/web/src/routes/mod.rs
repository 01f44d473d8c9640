//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Store list (public)
//! GET  /health                 - Health check
//!
//! # Catalog (requires auth except /)
//! GET  /new_store              - New store form
//! POST /new_store              - Create store
//! GET  /store/{id}             - Store detail + edit form
//! POST /store/{id}             - Apply store edits
//! GET  /new_item               - New item form
//! POST /new_item               - Create item
//! GET  /item/{id}              - Item detail + edit form + shopping-list flag
//! POST /item/{id}              - Apply item edits
//!
//! # Shopping list (requires auth)
//! GET  /shopping_list                        - Current user's items
//! POST /add_to_shopping_list/{item_id}       - Add membership (idempotent)
//! POST /remove_from_shopping_list/{item_id}  - Remove membership (idempotent)
//!
//! # Auth
//! GET  /signup                 - Signup page
//! POST /signup                 - Create account
//! GET  /login                  - Login page (honors ?next=)
//! POST /login                  - Login action
//! GET  /logout                 - End session
//! ```

pub mod auth;
pub mod home;
pub mod items;
pub mod shopping_list;
pub mod stores;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route(
            "/new_store",
            get(stores::new_store_page).post(stores::create_store),
        )
        .route(
            "/store/{store_id}",
            get(stores::store_detail_page).post(stores::update_store),
        )
        .route(
            "/new_item",
            get(items::new_item_page).post(items::create_item),
        )
        .route(
            "/item/{item_id}",
            get(items::item_detail_page).post(items::update_item),
        )
}

/// Create the shopping list routes router.
pub fn shopping_list_routes() -> Router<AppState> {
    Router::new()
        .route("/shopping_list", get(shopping_list::index))
        .route("/add_to_shopping_list/{item_id}", post(shopping_list::add))
        .route(
            "/remove_from_shopping_list/{item_id}",
            post(shopping_list::remove),
        )
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(shopping_list_routes())
        .merge(auth_routes())
}
