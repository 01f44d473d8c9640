//! Integration tests for shopping list membership.
//!
//! Run with: cargo test -p greenbasket-integration-tests -- --ignored

use reqwest::StatusCode;

use greenbasket_integration_tests::{
    base_url, client, create_item, create_store, id_from_path, signup_and_login,
};

/// Count how many times the item name appears as a list entry on the
/// shopping list page.
async fn list_occurrences(client: &reqwest::Client, item_name: &str) -> usize {
    let body = client
        .get(format!("{}/shopping_list", base_url()))
        .send()
        .await
        .expect("Failed to fetch shopping list")
        .text()
        .await
        .expect("Failed to read response");

    body.matches(item_name).count()
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_add_to_shopping_list_is_idempotent() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "list").await;

    let store_path = create_store(&client, "List Test Market", "7 Seventh St").await;
    let item_path = create_item(&client, "Frozen Peas", "1.99", &id_from_path(&store_path)).await;
    let item_id = id_from_path(&item_path);

    assert_eq!(list_occurrences(&client, "Frozen Peas").await, 0);

    // First add: the list grows by one
    let resp = client
        .post(format!("{base_url}/add_to_shopping_list/{item_id}"))
        .send()
        .await
        .expect("Failed to add to shopping list");
    assert!(resp.status().is_redirection());
    assert_eq!(list_occurrences(&client, "Frozen Peas").await, 1);

    // Second add: unchanged
    let resp = client
        .post(format!("{base_url}/add_to_shopping_list/{item_id}"))
        .send()
        .await
        .expect("Failed to repeat add");
    assert!(resp.status().is_redirection());
    assert_eq!(list_occurrences(&client, "Frozen Peas").await, 1);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_remove_from_shopping_list_is_idempotent() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "list").await;

    let store_path = create_store(&client, "Remove Test Market", "8 Eighth St").await;
    let item_path = create_item(&client, "Rye Crackers", "3.25", &id_from_path(&store_path)).await;
    let item_id = id_from_path(&item_path);

    client
        .post(format!("{base_url}/add_to_shopping_list/{item_id}"))
        .send()
        .await
        .expect("Failed to add to shopping list");
    assert_eq!(list_occurrences(&client, "Rye Crackers").await, 1);

    // First remove empties the entry; second remove must not fault
    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/remove_from_shopping_list/{item_id}"))
            .send()
            .await
            .expect("Failed to remove from shopping list");
        assert!(resp.status().is_redirection());
        assert_eq!(list_occurrences(&client, "Rye Crackers").await, 0);
    }
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_item_detail_membership_flag_round_trip() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "list").await;

    let store_path = create_store(&client, "Flag Test Market", "6 Sixth St").await;
    let item_path = create_item(&client, "Clover Honey", "5.40", &id_from_path(&store_path)).await;
    let item_id = id_from_path(&item_path);

    let detail = |client: &reqwest::Client| {
        let url = format!("{base_url}/item/{item_id}");
        let client = client.clone();
        async move {
            client
                .get(url)
                .send()
                .await
                .expect("Failed to fetch item detail")
                .text()
                .await
                .expect("Failed to read response")
        }
    };

    // Not a member yet: the page offers to add
    let body = detail(&client).await;
    assert!(body.contains("/add_to_shopping_list/"));

    client
        .post(format!("{base_url}/add_to_shopping_list/{item_id}"))
        .send()
        .await
        .expect("Failed to add to shopping list");

    // Member: the page offers to remove
    let body = detail(&client).await;
    assert!(body.contains("This item is on your shopping list."));
    assert!(body.contains("/remove_from_shopping_list/"));

    client
        .post(format!("{base_url}/remove_from_shopping_list/{item_id}"))
        .send()
        .await
        .expect("Failed to remove from shopping list");

    // Back to not a member
    let body = detail(&client).await;
    assert!(!body.contains("This item is on your shopping list."));
    assert!(body.contains("/add_to_shopping_list/"));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn test_add_missing_item_answers_404() {
    let client = client();
    let base_url = base_url();
    signup_and_login(&client, "list").await;

    let resp = client
        .post(format!("{base_url}/add_to_shopping_list/999999999"))
        .send()
        .await
        .expect("Failed to post");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
