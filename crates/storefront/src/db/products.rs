//! Product repository for database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use storehive_core::{CurrencyCode, Price, ProductId, StoreId};

use super::RepositoryError;
use crate::models::Product;

/// Row shape of `storefront.product`.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    store_id: i32,
    name: String,
    description: Option<String>,
    price: Decimal,
    currency_code: String,
    images: Vec<String>,
    featured: bool,
    published: bool,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let currency_code = row
            .currency_code
            .parse::<CurrencyCode>()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: ProductId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            description: row.description,
            price: Price::new(row.price, currency_code),
            images: row.images,
            featured: row.featured,
            published: row.published,
        })
    }
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub images: Vec<String>,
    pub featured: bool,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's published products in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored currency is unknown.
    #[instrument(skip(self))]
    pub async fn list_published(&self, store_id: StoreId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, store_id, name, description, price, currency_code, images, featured, published
            FROM storefront.product
            WHERE store_id = $1 AND published
            ORDER BY position ASC, id ASC
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get one published product, scoped to its store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored currency is unknown.
    #[instrument(skip(self))]
    pub async fn get_published(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, store_id, name, description, price, currency_code, images, featured, published
            FROM storefront.product
            WHERE store_id = $1 AND id = $2 AND published
            ",
        )
        .bind(store_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Add a published product to the end of a store's catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(
        &self,
        store_id: StoreId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO storefront.product
                (store_id, name, description, price, currency_code, images, featured, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7,
                    (SELECT COALESCE(MAX(position), 0) + 1 FROM storefront.product WHERE store_id = $1))
            RETURNING id, store_id, name, description, price, currency_code, images, featured, published
            ",
        )
        .bind(store_id)
        .bind(&product.name)
        .bind(product.description.as_deref())
        .bind(product.price.amount)
        .bind(product.price.currency_code.code())
        .bind(&product.images)
        .bind(product.featured)
        .fetch_one(self.pool)
        .await?;

        Product::try_from(row)
    }
}
