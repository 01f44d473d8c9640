//! Authentication route handlers.
//!
//! Handles signup, login, and logout. Login failures render a single generic
//! message so the response never reveals whether a username exists.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::forms::{FieldErrors, LoginForm, SignupForm};
use crate::middleware::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Path to return to after a successful login.
    pub next: Option<String>,
    /// Success code set by a preceding redirect (e.g. after signup).
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub form: SignupForm,
    pub errors: FieldErrors,
    pub current_user: Option<CurrentUser>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    /// Username to pre-fill after a failed attempt.
    pub username: String,
    /// Carried through as a hidden field so the redirect target survives
    /// the form round trip.
    pub next: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub current_user: Option<CurrentUser>,
}

// =============================================================================
// Signup
// =============================================================================

/// Display the signup page.
pub async fn signup_page(OptionalAuth(current_user): OptionalAuth) -> SignupTemplate {
    SignupTemplate {
        form: SignupForm::default(),
        errors: FieldErrors::new(),
        current_user,
    }
}

/// Handle signup form submission.
///
/// A taken username comes back as a field error on `username`, exactly like
/// any other validation failure; no second user row is created.
#[instrument(skip(state, current_user, form))]
pub async fn signup(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let rerender = |form: SignupForm, errors: FieldErrors| {
        SignupTemplate {
            form,
            errors,
            current_user,
        }
        .into_response()
    };

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return Ok(rerender(form, errors)),
    };

    match AuthService::new(state.pool())
        .signup(&valid.username, &valid.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "account created");
            Ok(Redirect::to("/login?success=account_created").into_response())
        }
        Err(AuthError::UserAlreadyExists) => {
            let mut errors = FieldErrors::new();
            errors.add("username", "That username is already taken.");
            Ok(rerender(form, errors))
        }
        Err(AuthError::WeakPassword(message)) => {
            let mut errors = FieldErrors::new();
            errors.add("password", message);
            Ok(rerender(form, errors))
        }
        Err(other) => Err(other.into()),
    }
}

// =============================================================================
// Login
// =============================================================================

/// Map a `?success=` code to the notice shown on the login page.
fn notice_for(code: &str) -> Option<String> {
    match code {
        "account_created" => Some("Account created. Please log in.".to_owned()),
        _ => None,
    }
}

/// Resolve the post-login redirect target.
///
/// Only site-local paths are honored; anything else falls back to the home
/// page so the login form can't be used as an open redirect.
fn local_redirect_target(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

/// Display the login page.
pub async fn login_page(
    Query(query): Query<LoginQuery>,
    OptionalAuth(current_user): OptionalAuth,
) -> LoginTemplate {
    LoginTemplate {
        username: String::new(),
        next: query.next,
        error: None,
        notice: query.success.as_deref().and_then(notice_for),
        current_user,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                username: user.username,
            };
            set_current_user(&session, &current_user).await?;

            tracing::info!(user_id = %current_user.id, "login");
            let target = local_redirect_target(form.next.as_deref()).to_owned();
            Ok(Redirect::to(&target).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            // One generic message for unknown-user and wrong-password alike
            Ok(LoginTemplate {
                username: form.username,
                next: form.next,
                error: Some("Invalid username or password.".to_owned()),
                notice: None,
                current_user: None,
            }
            .into_response())
        }
        Err(other) => Err(other.into()),
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout: clear the session and go home.
///
/// Like every other page, this requires a session; an anonymous request is
/// bounced to the login page instead.
#[instrument(skip(_current_user, session))]
pub async fn logout(RequireAuth(_current_user): RequireAuth, session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_redirect_target_accepts_site_paths() {
        assert_eq!(local_redirect_target(Some("/shopping_list")), "/shopping_list");
        assert_eq!(local_redirect_target(Some("/item/3?success=created")), "/item/3?success=created");
    }

    #[test]
    fn test_local_redirect_target_rejects_external_targets() {
        assert_eq!(local_redirect_target(Some("https://evil.example")), "/");
        assert_eq!(local_redirect_target(Some("//evil.example")), "/");
        assert_eq!(local_redirect_target(None), "/");
    }

    #[test]
    fn test_notice_for_known_codes_only() {
        assert!(notice_for("account_created").is_some());
        assert!(notice_for("bogus").is_none());
    }
}
