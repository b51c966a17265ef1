//! HTTP tests against a running storefront.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (sh-cli migrate)
//! - An active store seeded as `STOREFRONT_TEST_SLUG` (default `demo-shop`)
//! - The storefront running (cargo run -p storehive-storefront)
//!
//! Run with: cargo test -p storehive-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use storehive_integration_tests::{client, storefront_base_url, test_store_slug};

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_path_based_home_page() {
    let resp = client()
        .get(format!("{}/s/{}", storefront_base_url(), test_store_slug()))
        .send()
        .await
        .expect("Failed to get home page");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert!(resp.headers().contains_key("content-security-policy"));

    let body = resp.text().await.expect("body");
    assert!(body.contains("--color-primary"));
    assert!(body.contains("class=\"section"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_store_is_not_found() {
    let resp = client()
        .get(format!("{}/s/no-such-store-here", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get page");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_slug_lookup_is_exact() {
    let shouted = test_store_slug().to_uppercase();
    let resp = client()
        .get(format!("{}/s/{shouted}", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get page");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_theme_api_returns_layout() {
    let resp = client()
        .get(format!(
            "{}/api/stores/{}/theme",
            storefront_base_url(),
            test_store_slug()
        ))
        .send()
        .await
        .expect("Failed to get theme");

    assert_eq!(resp.status(), StatusCode::OK);
    let theme: Value = resp.json().await.expect("theme JSON");
    assert!(theme["layout_home"].is_array());
    assert!(theme["colors"]["primary"].is_string());
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_non_numeric_product_id_is_not_found() {
    let resp = client()
        .get(format!(
            "{}/s/{}/products/not-a-number",
            storefront_base_url(),
            test_store_slug()
        ))
        .send()
        .await
        .expect("Failed to get page");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
