//! Integration tests for Storehive.
//!
//! # Running Tests
//!
//! ```bash
//! # Library-level tests (no services needed)
//! cargo test -p storehive-integration-tests
//!
//! # HTTP tests against a running storefront with a seeded store
//! sh-cli migrate
//! sh-cli store create --slug demo-shop --name "Demo Shop" --owner 1
//! cargo run -p storehive-storefront &
//! cargo test -p storehive-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - Storefront origin (default: `http://localhost:3000`)
//! - `STOREFRONT_TEST_SLUG` - Slug of an active seeded store (default: `demo-shop`)

use chrono::{TimeZone, Utc};
use reqwest::Client;

use storehive_core::{OwnerId, StoreId, StoreSlug, ThemeConfig};
use storehive_storefront::models::Store;

/// Base URL of the storefront under test.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Slug of an active store seeded for tests.
#[must_use]
pub fn test_store_slug() -> String {
    std::env::var("STOREFRONT_TEST_SLUG").unwrap_or_else(|_| "demo-shop".to_string())
}

/// HTTP client for storefront requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// An in-memory active store, optionally with a saved theme.
///
/// # Panics
///
/// Panics if `slug` is not a valid store slug.
#[must_use]
#[allow(clippy::expect_used)]
pub fn store(slug: &str, theme: Option<ThemeConfig>) -> Store {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).single().expect("valid timestamp");
    Store {
        id: StoreId::new(1),
        slug: StoreSlug::parse(slug).expect("valid slug"),
        owner_id: OwnerId::new(1),
        name: "Test Store".to_string(),
        theme_config: theme,
        active: true,
        created_at: now,
        updated_at: now,
    }
}
