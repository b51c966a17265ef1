//! Fixtures shared by unit tests.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use storehive_core::{CurrencyCode, OwnerId, Price, ProductId, StoreId, StoreSlug};

use crate::models::{Product, Store};

/// An active store with no persisted theme.
#[allow(clippy::unwrap_used)]
pub fn store_fixture(id: i32, slug: &str) -> Store {
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    Store {
        id: StoreId::new(id),
        slug: StoreSlug::parse(slug).unwrap(),
        owner_id: OwnerId::new(1),
        name: format!("Store {slug}"),
        theme_config: None,
        active: true,
        created_at: created,
        updated_at: created,
    }
}

/// A published product priced at $10.00 with one image.
pub fn product_fixture(id: i32, store_id: i32, name: &str, featured: bool) -> Product {
    Product {
        id: ProductId::new(id),
        store_id: StoreId::new(store_id),
        name: name.to_string(),
        description: Some(format!("About {name}.")),
        price: Price::new(Decimal::new(1000, 2), CurrencyCode::USD),
        images: vec![format!("https://cdn.example.com/{id}.jpg")],
        featured,
        published: true,
    }
}
