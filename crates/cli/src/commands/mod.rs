//! CLI command implementations.

pub mod migrate;
pub mod product;
pub mod store;
pub mod theme;

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

use storehive_core::theme::ThemeValidationError;
use storehive_core::types::SlugError;
use storehive_storefront::db::RepositoryError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Slug cannot be normalized into a valid store slug.
    #[error("Invalid slug {input:?}: {source}")]
    InvalidSlug { input: String, source: SlugError },

    /// No store has this slug.
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// Theme file could not be read.
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Theme document failed validation.
    #[error(transparent)]
    Theme(#[from] ThemeValidationError),

    /// Invalid command argument.
    #[error("Invalid {arg}: {reason}")]
    InvalidArgument { arg: &'static str, reason: String },
}

/// Read the storefront database URL, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CliError> {
    dotenvy::dotenv().ok();

    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("STOREFRONT_DATABASE_URL"))
}

/// Connect to the storefront database.
async fn connect() -> Result<PgPool, CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to storefront database...");
    Ok(PgPool::connect(database_url.expose_secret()).await?)
}
