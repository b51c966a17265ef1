//! Store provisioning commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a store; the slug is normalized ("My Shop" -> "my-shop")
//! sh-cli store create --slug "My Shop" --name "My Shop" --owner 42
//!
//! # Hide a store from the storefront without deleting it
//! sh-cli store deactivate --slug my-shop
//!
//! # Bring it back
//! sh-cli store activate --slug my-shop
//! ```

use storehive_core::{OwnerId, StoreSlug, ThemeConfig};
use storehive_storefront::db::{RepositoryError, StoreRepository};

use super::{CliError, connect};

/// Normalize a requested slug the way every persisted slug is normalized.
///
/// # Errors
///
/// Returns `CliError::InvalidSlug` if nothing valid remains after normalizing.
pub fn normalize_slug(input: &str) -> Result<StoreSlug, CliError> {
    StoreSlug::normalize(input).map_err(|source| CliError::InvalidSlug {
        input: input.to_owned(),
        source,
    })
}

/// Create a store with the default theme.
///
/// # Errors
///
/// Returns `CliError` if the slug is invalid or taken, or the database fails.
pub async fn create(slug: &str, name: &str, owner: i32) -> Result<(), CliError> {
    let slug = normalize_slug(slug)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidArgument {
            arg: "name",
            reason: "must not be empty".to_owned(),
        });
    }

    let pool = connect().await?;
    let store = StoreRepository::new(&pool)
        .create(&slug, name, OwnerId::new(owner), &ThemeConfig::default())
        .await?;

    tracing::info!(
        "Store created successfully! ID: {}, Slug: {}, Name: {}",
        store.id,
        store.slug,
        store.name
    );
    Ok(())
}

/// Activate or deactivate a store.
///
/// # Errors
///
/// Returns `CliError::StoreNotFound` if no store has this slug.
pub async fn set_active(slug: &str, active: bool) -> Result<(), CliError> {
    let pool = connect().await?;

    match StoreRepository::new(&pool).set_active(slug, active).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => return Err(CliError::StoreNotFound(slug.to_owned())),
        Err(e) => return Err(e.into()),
    }

    if active {
        tracing::info!("Store {} activated", slug);
    } else {
        tracing::info!("Store {} deactivated; its pages now return 404", slug);
    }
    Ok(())
}
