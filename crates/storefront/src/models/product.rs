//! Product domain type.

use serde::Serialize;

use storehive_core::{Price, ProductId, StoreId};

/// A product belonging to exactly one store.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    /// Image URLs; the first one with a safe URL is the featured image.
    pub images: Vec<String>,
    /// Highlighted by `featured_product` and `featuredOnly` grids.
    pub featured: bool,
    /// Only published products are shown on the storefront.
    pub published: bool,
}

