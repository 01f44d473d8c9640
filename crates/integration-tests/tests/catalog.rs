//! Integration tests for store and item CRUD.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The server running (cargo run -p greenbasket-web)
//!
//! Run with: cargo test -p greenbasket-integration-tests -- --ignored

use reqwest::StatusCode;

use greenbasket_core::ItemCategory;
use greenbasket_integration_tests::{
    base_url, client, create_item, create_store, id_from_path, signup_and_login,
};

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_create_store_redirects_and_renders_title() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "catalog").await;

    // POST /new_store -> 302 to /store/{id}
    let path = create_store(&client, "Corner Market", "123 Main St").await;
    assert!(path.starts_with("/store/"), "unexpected redirect: {path}");

    // GET the detail page; submitted title and address come back verbatim
    let resp = client
        .get(format!("{base_url}{path}"))
        .send()
        .await
        .expect("Failed to fetch store detail");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Corner Market"));
    assert!(body.contains("123 Main St"));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_edit_store_round_trip() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "catalog").await;

    let path = create_store(&client, "Old Name", "1 First Ave").await;
    let store_id = id_from_path(&path);

    let resp = client
        .post(format!("{base_url}/store/{store_id}"))
        .form(&[("title", "New Name"), ("address", "2 Second Ave")])
        .send()
        .await
        .expect("Failed to edit store");
    assert!(resp.status().is_redirection());

    let body = client
        .get(format!("{base_url}/store/{store_id}"))
        .send()
        .await
        .expect("Failed to fetch store detail")
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains("New Name"));
    assert!(body.contains("2 Second Ave"));
    assert!(!body.contains("Old Name"));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_store_create_with_blank_title_rerenders_with_error() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "catalog").await;

    let resp = client
        .post(format!("{base_url}/new_store"))
        .form(&[("title", ""), ("address", "123 Main St")])
        .send()
        .await
        .expect("Failed to post form");

    // Validation failure re-renders the form instead of redirecting
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Title is required."));
    // The good field survives the round trip
    assert!(body.contains("123 Main St"));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_item_create_rejects_category_outside_enumeration() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "catalog").await;

    let store_path = create_store(&client, "Category Test Market", "9 Ninth St").await;
    let store_id = id_from_path(&store_path);

    let resp = client
        .post(format!("{base_url}/new_item"))
        .form(&[
            ("name", "Mystery Goods"),
            ("price", "3.00"),
            ("category", "seafood"),
            ("photo_url", ""),
            ("store", store_id.as_str()),
        ])
        .send()
        .await
        .expect("Failed to post form");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Select a valid category."));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_item_detail_shows_created_item() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "catalog").await;

    let store_path = create_store(&client, "Item Home Market", "5 Fifth St").await;
    let store_id = id_from_path(&store_path);
    let item_path = create_item(&client, "Rolled Oats", "2.75", &store_id).await;

    let body = client
        .get(format!("{base_url}{item_path}"))
        .send()
        .await
        .expect("Failed to fetch item detail")
        .text()
        .await
        .expect("Failed to read response");

    assert!(body.contains("Rolled Oats"));
    assert!(body.contains("$2.75"));
    assert!(body.contains(ItemCategory::Pantry.label()));
    assert!(body.contains("Item Home Market"));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_missing_store_and_item_answer_404() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "catalog").await;

    let resp = client
        .get(format!("{base_url}/store/999999999"))
        .send()
        .await
        .expect("Failed to fetch store");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{base_url}/item/999999999"))
        .send()
        .await
        .expect("Failed to fetch item");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_protected_pages_redirect_to_login_with_next() {
    // Fresh client with no session
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/shopping_list"))
        .send()
        .await
        .expect("Failed to fetch page");

    assert!(resp.status().is_redirection());
    let location = greenbasket_integration_tests::location(&resp);
    assert!(
        location.starts_with("/login?next=%2Fshopping_list"),
        "unexpected redirect: {location}"
    );
}
