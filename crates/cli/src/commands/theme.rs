//! Theme commands.
//!
//! Reads are lenient everywhere else; this is the strict write path. A theme
//! file must pass validation before it is stored.
//!
//! # Usage
//!
//! ```bash
//! # Check a theme file without touching the database
//! sh-cli theme validate theme.json
//!
//! # Replace a store's theme (blocks of unknown types are rejected unless allowed)
//! sh-cli theme set --slug my-shop --file theme.json [--allow-unknown]
//!
//! # Print the theme a store renders with
//! sh-cli theme show --slug my-shop
//! ```

use std::path::Path;

use storehive_core::theme::validate_theme_json;
use storehive_core::{Block, ThemeConfig};
use storehive_storefront::db::{RepositoryError, StoreRepository};
use storehive_storefront::theme::is_registered;

use super::{CliError, connect};

/// Read and strictly validate a theme file.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be read and `CliError::Theme`
/// listing every problem if it is invalid.
pub fn load(path: &Path, allow_unknown: bool) -> Result<ThemeConfig, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })?;

    Ok(validate_theme_json(&json, allow_unknown)?)
}

/// Describe a layout as `id:type` pairs for log output.
fn describe(layout: &[Block]) -> String {
    layout
        .iter()
        .map(|b| format!("{}:{}", b.id, b.type_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ids of blocks the storefront has no renderer for.
fn unrenderable(layout: &[Block]) -> Vec<&str> {
    layout
        .iter()
        .filter(|b| !is_registered(b.type_name()))
        .map(|b| b.id.as_str())
        .collect()
}

/// Warn about blocks that will be skipped when the page renders.
fn warn_unrenderable(layout: &[Block]) {
    let skipped = unrenderable(layout);
    if !skipped.is_empty() {
        tracing::warn!(
            "{} block(s) have unknown types and will not render until supported: [{}]",
            skipped.len(),
            skipped.join(", ")
        );
    }
}

/// Validate a theme file.
///
/// # Errors
///
/// Returns `CliError` if the file is unreadable or invalid.
pub fn validate(path: &Path, allow_unknown: bool) -> Result<(), CliError> {
    let theme = load(path, allow_unknown)?;
    warn_unrenderable(&theme.layout_home);

    tracing::info!(
        "Theme is valid: {} block(s) [{}]",
        theme.layout_home.len(),
        describe(&theme.layout_home)
    );
    Ok(())
}

/// Validate a theme file and store it on a store.
///
/// # Errors
///
/// Returns `CliError` if validation fails, the store does not exist, or the
/// database fails.
pub async fn set(slug: &str, path: &Path, allow_unknown: bool) -> Result<(), CliError> {
    let theme = load(path, allow_unknown)?;
    let pool = connect().await?;

    match StoreRepository::new(&pool).update_theme(slug, &theme).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => return Err(CliError::StoreNotFound(slug.to_owned())),
        Err(e) => return Err(e.into()),
    }

    warn_unrenderable(&theme.layout_home);

    tracing::info!(
        "Theme updated for {}: [{}]",
        slug,
        describe(&theme.layout_home)
    );
    Ok(())
}

/// Print the effective theme of a store as JSON.
///
/// # Errors
///
/// Returns `CliError::StoreNotFound` if no store has this slug.
pub async fn show(slug: &str) -> Result<(), CliError> {
    let pool = connect().await?;

    let store = StoreRepository::new(&pool)
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| CliError::StoreNotFound(slug.to_owned()))?;

    if store.theme_config.is_none() {
        tracing::info!("Store {} has no saved theme; showing the default", slug);
    }
    let theme = store.theme_config.unwrap_or_default();
    let json = serde_json::to_string_pretty(&theme).map_err(|e| CliError::InvalidArgument {
        arg: "theme",
        reason: e.to_string(),
    })?;

    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }
    Ok(())
}
