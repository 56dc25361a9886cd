//! Integration tests for the shop's page and cart flows.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The web server running (cargo run -p silver-pizza-web)
//! - A seeded catalog (cargo run -p silver-pizza-cli -- seed ...)
//!
//! Run with: cargo test -p silver-pizza-integration-tests -- --ignored

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::json;

/// Base URL for the web server (configurable via environment).
fn base_url() -> String {
    std::env::var("PIZZA_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Create a client with a cookie store, so sessions survive across requests.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique username for registration tests.
fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("{prefix}{nanos}")
}

// ============================================================================
// Guest Page Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_home_page_renders() {
    let resp = client()
        .get(base_url())
        .send()
        .await
        .expect("Failed to get home page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Silver Pizza"));
}

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_malformed_cart_cookie_degrades_to_empty_cart() {
    let resp = client()
        .get(base_url())
        .header("Cookie", "cart=this-is-not-json")
        .send()
        .await
        .expect("Failed to get home page");

    // The page renders instead of failing; the cart badge shows zero.
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(r#"<span id="cart-count" class="badge">0</span>"#));
}

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_guest_cart_cookie_fills_badge() {
    let resp = client()
        .get(base_url())
        .header("Cookie", r#"cart={"1": {"quantity": 2}}"#)
        .send()
        .await
        .expect("Failed to get home page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    // Assumes the seeded catalog still has pizza id 1.
    assert!(body.contains(r#"<span id="cart-count" class="badge">2</span>"#));
}

// ============================================================================
// Catalog Filter Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_assortment_filter_by_kind() {
    let resp = client()
        .post(format!("{}/assortment/", base_url()))
        .form(&[("list_of_types", "vegetarian")])
        .send()
        .await
        .expect("Failed to post filter");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Showing: Vegetarian"));
}

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_assortment_unknown_filter_falls_back_to_all() {
    let resp = client()
        .post(format!("{}/assortment/", base_url()))
        .form(&[("list_of_types", "hawaiian")])
        .send()
        .await
        .expect("Failed to post filter");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(!body.contains("Showing:"));
}

// ============================================================================
// Quantity Endpoint Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_update_item_requires_auth() {
    let resp = client()
        .post(format!("{}/update_item/", base_url()))
        .json(&json!({"pizzaId": 1, "action": "add"}))
        .send()
        .await
        .expect("Failed to post update");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running web server and seeded database"]
async fn test_register_login_and_update_cart() {
    let client = client();
    let base = base_url();
    let username = unique_username("tester");

    // Register
    let resp = client
        .post(format!("{base}/auth/register"))
        .form(&[
            ("username", username.as_str()),
            ("password1", "integration-pass"),
            ("password2", "integration-pass"),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // Login (cookie store keeps the session)
    let resp = client
        .post(format!("{base}/auth/login"))
        .form(&[
            ("username", username.as_str()),
            ("password", "integration-pass"),
        ])
        .send()
        .await
        .expect("Failed to login");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // Add an item twice; the fixed acknowledgement comes back each time.
    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/update_item/"))
            .json(&json!({"pizzaId": 1, "action": "add"}))
            .send()
            .await
            .expect("Failed to post update");
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.text().await.expect("Failed to read response");
        assert!(body.contains("Item Was Added"));
    }

    // The badge now shows two units.
    let resp = client
        .get(&base)
        .send()
        .await
        .expect("Failed to get home page");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(r#"<span id="cart-count" class="badge">2</span>"#));

    // Remove both; the line item disappears entirely.
    for _ in 0..2 {
        client
            .post(format!("{base}/update_item/"))
            .json(&json!({"pizzaId": 1, "action": "remove"}))
            .send()
            .await
            .expect("Failed to post update");
    }

    let resp = client
        .get(&base)
        .send()
        .await
        .expect("Failed to get home page");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(r#"<span id="cart-count" class="badge">0</span>"#));
}

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_update_item_unknown_pizza_is_404() {
    let client = client();
    let base = base_url();
    let username = unique_username("ghost");

    client
        .post(format!("{base}/auth/register"))
        .form(&[
            ("username", username.as_str()),
            ("password1", "integration-pass"),
            ("password2", "integration-pass"),
        ])
        .send()
        .await
        .expect("Failed to register");
    client
        .post(format!("{base}/auth/login"))
        .form(&[
            ("username", username.as_str()),
            ("password", "integration-pass"),
        ])
        .send()
        .await
        .expect("Failed to login");

    let resp = client
        .post(format!("{base}/update_item/"))
        .json(&json!({"pizzaId": 999_999, "action": "add"}))
        .send()
        .await
        .expect("Failed to post update");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Checkout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_checkout_validation_rerenders_with_errors() {
    let resp = client()
        .post(format!("{}/checkout/", base_url()))
        .form(&[("address", ""), ("phone", "")])
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Please enter a delivery address"));
    assert!(body.contains("Please enter a phone number"));
}

#[tokio::test]
#[ignore = "Requires running web server and database"]
async fn test_guest_checkout_redirects_to_payment() {
    let resp = client()
        .post(format!("{}/checkout/", base_url()))
        .form(&[("address", "1 Pizza Lane"), ("phone", "+7 900 000-00-00")])
        .send()
        .await
        .expect("Failed to post checkout");

    // The client follows the redirect to the payment stub.
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Payment"));
}
