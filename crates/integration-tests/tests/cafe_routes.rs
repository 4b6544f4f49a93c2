//! Integration tests for the cafe pages.
//!
//! Each test drives the full router (middleware included) over its own
//! in-memory database.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use cafe_directory_core::CafeId;
use cafe_directory_integration_tests::{TestContext, brew_lab_form};

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_home_page() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("content-type").unwrap().starts_with("text/html"));
    assert!(response.body.contains("href=\"/cafes\""));
}

#[tokio::test]
async fn test_empty_list_page() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/cafes").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("No cafes yet"));
}

#[tokio::test]
async fn test_add_page_renders_empty_form() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/add").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("name=\"cafe_name\""));
    assert!(response.body.contains("name=\"coffee_price\""));
    assert!(!response.body.contains("class=\"error\""));
}

// =============================================================================
// Add
// =============================================================================

#[tokio::test]
async fn test_add_then_list_scenario() {
    let ctx = TestContext::new().await;

    let response = ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/"));

    let cafes = ctx.cafes().list().await.unwrap();
    assert_eq!(cafes.len(), 1);
    let cafe = cafes.first().unwrap();
    assert_eq!(cafe.name, "Brew Lab");
    assert_eq!(cafe.map_url, "https://maps.example/1");
    assert_eq!(cafe.img_url, "https://img.example/1");
    assert_eq!(cafe.location, "Downtown");
    assert_eq!(cafe.seats, "10-20");
    assert!(cafe.has_toilet);
    assert!(cafe.has_wifi);
    assert!(!cafe.has_sockets);
    assert!(!cafe.can_take_calls);
    assert_eq!(cafe.coffee_price.as_deref(), Some("3.50"));

    let page = ctx.get("/cafes").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Brew Lab"));
    assert!(page.body.contains("3.50"));
    assert!(page.body.contains(&format!("/edit?id={}", cafe.id)));
}

#[tokio::test]
async fn test_add_duplicate_name_conflicts() {
    let ctx = TestContext::new().await;

    let first = ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;
    let second = ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;

    assert_eq!(first.status, StatusCode::FOUND);
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(ctx.cafes().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_invalid_url_rerenders_form() {
    let ctx = TestContext::new().await;

    let mut form = brew_lab_form("Brew Lab");
    form.retain(|(key, _)| *key != "map_url");
    form.push(("map_url", "not-a-url"));

    let response = ctx.post_form("/add", &form).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Invalid URL."));
    // Submitted values are kept
    assert!(response.body.contains("value=\"not-a-url\""));
    assert!(response.body.contains("value=\"Brew Lab\""));
    assert_eq!(ctx.cafes().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_missing_required_fields() {
    let ctx = TestContext::new().await;

    let response = ctx.post_form("/add", &[("cafe_name", "Brew Lab")]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("This field is required."));
    assert_eq!(ctx.cafes().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_rejects_negative_price() {
    let ctx = TestContext::new().await;

    let mut form = brew_lab_form("Brew Lab");
    form.retain(|(key, _)| *key != "coffee_price");
    form.push(("coffee_price", "-1"));

    let response = ctx.post_form("/add", &form).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Not a valid price"));
    assert_eq!(ctx.cafes().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_without_price_stores_none() {
    let ctx = TestContext::new().await;

    let mut form = brew_lab_form("Brew Lab");
    form.retain(|(key, _)| *key != "coffee_price");

    let response = ctx.post_form("/add", &form).await;

    assert_eq!(response.status, StatusCode::FOUND);
    let cafe = ctx.cafes().list().await.unwrap().pop().unwrap();
    assert_eq!(cafe.coffee_price, None);
}

#[tokio::test]
async fn test_wifi_checkbox_presence() {
    let ctx = TestContext::new().await;

    let checked = brew_lab_form("Checked");
    let mut unchecked = brew_lab_form("Unchecked");
    unchecked.retain(|(key, _)| *key != "has_wifi");
    let mut literal_false = brew_lab_form("Literal False");
    literal_false.retain(|(key, _)| *key != "has_wifi");
    literal_false.push(("has_wifi", "false"));

    for form in [&checked, &unchecked, &literal_false] {
        let response = ctx.post_form("/add", form).await;
        assert_eq!(response.status, StatusCode::FOUND);
    }

    let wifi: Vec<(String, bool)> = ctx
        .cafes()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|cafe| (cafe.name, cafe.has_wifi))
        .collect();

    assert_eq!(
        wifi,
        vec![
            ("Checked".to_string(), true),
            ("Unchecked".to_string(), false),
            ("Literal False".to_string(), true),
        ]
    );
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_removes_only_target() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &brew_lab_form("First")).await;
    ctx.post_form("/add", &brew_lab_form("Second")).await;
    let cafes = ctx.cafes().list().await.unwrap();
    let first = cafes.first().unwrap();

    let response = ctx.get(&format!("/delete?id={}", first.id)).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/"));
    let remaining: Vec<String> = ctx
        .cafes()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|cafe| cafe.name)
        .collect();
    assert_eq!(remaining, vec!["Second".to_string()]);

    let page = ctx.get("/cafes").await;
    assert!(!page.body.contains("First"));
}

#[tokio::test]
async fn test_delete_via_post() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;
    let cafe = ctx.cafes().list().await.unwrap().pop().unwrap();

    let response = ctx.post_form(&format!("/delete?id={}", cafe.id), &[]).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(ctx.cafes().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;

    let response = ctx.get("/delete?id=999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.cafes().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_without_id_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/delete").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Edit
// =============================================================================

#[tokio::test]
async fn test_edit_page_prefills_location() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;
    let cafe = ctx.cafes().list().await.unwrap().pop().unwrap();

    let response = ctx.get(&format!("/edit?id={}", cafe.id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("value=\"Downtown\""));
    assert!(response.body.contains(&format!("value=\"{}\"", cafe.id)));
}

#[tokio::test]
async fn test_edit_page_missing_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/edit?id=42").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_updates_location_only() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;
    let before = ctx.cafes().list().await.unwrap().pop().unwrap();
    let id = before.id.to_string();

    let response = ctx
        .post_form("/edit", &[("id", id.as_str()), ("cafe_location", "Uptown")])
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/"));

    let after = ctx.cafes().get_by_id(before.id).await.unwrap().unwrap();
    assert_eq!(after.location, "Uptown");
    assert_eq!(after.name, before.name);
    assert_eq!(after.seats, before.seats);
    assert_eq!(after.has_wifi, before.has_wifi);
    assert_eq!(after.coffee_price, before.coffee_price);
}

#[tokio::test]
async fn test_edit_missing_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;
    let before = ctx.cafes().list().await.unwrap();

    let response = ctx
        .post_form("/edit", &[("id", "999"), ("cafe_location", "Uptown")])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.cafes().list().await.unwrap(), before);
    assert!(ctx.cafes().get_by_id(CafeId::new(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_edit_page_non_integer_id_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/edit?id=abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_post_bad_id_is_unprocessable() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;
    let before = ctx.cafes().list().await.unwrap();

    let non_integer = ctx
        .post_form("/edit", &[("id", "abc"), ("cafe_location", "Uptown")])
        .await;
    let missing = ctx.post_form("/edit", &[("cafe_location", "Uptown")]).await;

    assert_eq!(non_integer.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(missing.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.cafes().list().await.unwrap(), before);
}

#[tokio::test]
async fn test_edit_blank_location_rerenders_form() {
    let ctx = TestContext::new().await;
    ctx.post_form("/add", &brew_lab_form("Brew Lab")).await;
    let before = ctx.cafes().list().await.unwrap().pop().unwrap();
    let id = before.id.to_string();

    let response = ctx
        .post_form("/edit", &[("id", id.as_str()), ("cafe_location", "   ")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("This field is required."));
    let after = ctx.cafes().get_by_id(before.id).await.unwrap().unwrap();
    assert_eq!(after.location, "Downtown");
}
