//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::StoreRepository;
use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, GroceryStore};
use crate::state::AppState;

/// Home page template: every store in the catalog.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub stores: Vec<GroceryStore>,
    pub current_user: Option<CurrentUser>,
}

/// Display the home page.
#[instrument(skip(state, current_user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<HomeTemplate> {
    let stores = StoreRepository::new(state.pool()).get_all().await?;

    Ok(HomeTemplate {
        stores,
        current_user,
    })
}
