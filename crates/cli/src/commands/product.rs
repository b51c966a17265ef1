//! Product catalog commands.
//!
//! # Usage
//!
//! ```bash
//! sh-cli product add --slug my-shop --name "Tote bag" --price 24.50 \
//!     --currency USD --image https://cdn.example.com/tote.jpg --featured
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use storehive_core::{CurrencyCode, Price};
use storehive_storefront::db::{ProductRepository, StoreRepository, products::NewProduct};

use super::{CliError, connect};

/// Arguments for [`add`].
#[derive(Debug, Clone)]
pub struct AddProduct {
    pub slug: String,
    pub name: String,
    pub price: String,
    pub currency: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub featured: bool,
}

/// Parse a non-negative decimal price in a known currency.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for malformed or negative amounts and
/// unknown currencies.
pub fn parse_price(amount: &str, currency: &str) -> Result<Price, CliError> {
    let amount = Decimal::from_str(amount.trim()).map_err(|e| CliError::InvalidArgument {
        arg: "price",
        reason: e.to_string(),
    })?;
    if amount.is_sign_negative() {
        return Err(CliError::InvalidArgument {
            arg: "price",
            reason: "must not be negative".to_owned(),
        });
    }

    let currency = currency
        .trim()
        .to_ascii_uppercase()
        .parse::<CurrencyCode>()
        .map_err(|reason| CliError::InvalidArgument {
            arg: "currency",
            reason,
        })?;

    Ok(Price::new(amount, currency))
}

/// Add a published product to a store's catalog.
///
/// # Errors
///
/// Returns `CliError` if arguments are invalid, the store does not exist, or
/// the database fails.
pub async fn add(args: AddProduct) -> Result<(), CliError> {
    let price = parse_price(&args.price, &args.currency)?;
    let pool = connect().await?;

    let store = StoreRepository::new(&pool)
        .get_by_slug(&args.slug)
        .await?
        .ok_or_else(|| CliError::StoreNotFound(args.slug.clone()))?;

    let product = ProductRepository::new(&pool)
        .create(
            store.id,
            &NewProduct {
                name: args.name,
                description: args.description,
                price,
                images: args.images,
                featured: args.featured,
            },
        )
        .await?;

    tracing::info!(
        "Product added! ID: {}, Store: {}, Name: {}, Price: {}",
        product.id,
        store.slug,
        product.name,
        product.price
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        let price = parse_price("24.50", "eur").unwrap();
        assert_eq!(price.display(), "€24.50");
    }

    #[test]
    fn test_parse_price_rejects_bad_input() {
        assert!(matches!(
            parse_price("-1", "USD"),
            Err(CliError::InvalidArgument { arg: "price", .. })
        ));
        assert!(matches!(
            parse_price("abc", "USD"),
            Err(CliError::InvalidArgument { arg: "price", .. })
        ));
        assert!(matches!(
            parse_price("1.00", "XYZ"),
            Err(CliError::InvalidArgument { arg: "currency", .. })
        ));
    }
}
