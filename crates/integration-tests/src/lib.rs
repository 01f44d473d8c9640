//! Integration tests for Greenbasket.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, then the server
//! cargo run -p greenbasket-web
//!
//! # Run integration tests
//! cargo test -p greenbasket-integration-tests -- --ignored
//! ```
//!
//! The tests drive a running server over HTTP with a cookie-holding client,
//! the same way a browser does. Each test signs up a fresh, uniquely named
//! account so tests don't interfere with each other or with existing data.

use reqwest::Client;
use uuid::Uuid;

/// Base URL for the application (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("GREENBASKET_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client that holds session cookies and does not follow
/// redirects, so tests can assert on 302 responses directly.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique username for this test run.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Sign up a fresh account and log the client's cookie jar into it.
///
/// Returns the username.
///
/// # Panics
///
/// Panics if signup or login does not redirect as expected.
pub async fn signup_and_login(client: &Client, prefix: &str) -> String {
    let base_url = base_url();
    let username = unique_username(prefix);
    let password = "integration-test-password";

    let resp = client
        .post(format!("{base_url}/signup"))
        .form(&[("username", username.as_str()), ("password", password)])
        .send()
        .await
        .expect("Failed to sign up");
    assert!(
        resp.status().is_redirection(),
        "signup should redirect to login, got {}",
        resp.status()
    );

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("username", username.as_str()), ("password", password)])
        .send()
        .await
        .expect("Failed to log in");
    assert!(
        resp.status().is_redirection(),
        "login should redirect home, got {}",
        resp.status()
    );

    username
}

/// Create a store via the form endpoint and return the redirect target
/// (`/store/{id}?success=created`).
///
/// # Panics
///
/// Panics if the response is not a redirect with a `Location` header.
pub async fn create_store(client: &Client, title: &str, address: &str) -> String {
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/new_store"))
        .form(&[("title", title), ("address", address)])
        .send()
        .await
        .expect("Failed to create store");
    assert!(
        resp.status().is_redirection(),
        "store creation should redirect, got {}",
        resp.status()
    );

    location(&resp)
}

/// Create an item in the given store and return the redirect target
/// (`/item/{id}?success=created`).
///
/// # Panics
///
/// Panics if the response is not a redirect with a `Location` header.
pub async fn create_item(client: &Client, name: &str, price: &str, store_id: &str) -> String {
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/new_item"))
        .form(&[
            ("name", name),
            ("price", price),
            ("category", "pantry"),
            ("photo_url", ""),
            ("store", store_id),
        ])
        .send()
        .await
        .expect("Failed to create item");
    assert!(
        resp.status().is_redirection(),
        "item creation should redirect, got {}",
        resp.status()
    );

    location(&resp)
}

/// The `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the header is missing or not valid UTF-8.
#[must_use]
pub fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .expect("Location header should be UTF-8")
        .to_owned()
}

/// Extract the numeric id out of a detail-page path like `/store/7?success=created`.
///
/// # Panics
///
/// Panics if the path has no trailing id segment.
#[must_use]
pub fn id_from_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    path.rsplit('/')
        .next()
        .expect("path should have an id segment")
        .to_owned()
}
