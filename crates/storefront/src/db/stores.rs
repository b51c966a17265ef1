//! Store repository for database operations.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use storehive_core::{OwnerId, StoreId, StoreSlug, ThemeConfig};

use super::RepositoryError;
use crate::models::Store;
use crate::tenant::StoreSource;

/// Row shape of `storefront.store`.
#[derive(sqlx::FromRow)]
struct StoreRow {
    id: i32,
    slug: String,
    owner_id: i32,
    name: String,
    theme_config: Option<JsonValue>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let slug = StoreSlug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;
        let theme_config = decode_theme(slug.as_str(), row.theme_config);

        Ok(Self {
            id: StoreId::new(row.id),
            slug,
            owner_id: OwnerId::new(row.owner_id),
            name: row.name,
            theme_config,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Decode a stored theme; an unreadable one is treated as absent.
fn decode_theme(slug: &str, value: Option<JsonValue>) -> Option<ThemeConfig> {
    let value = value.filter(|v| !v.is_null())?;
    match serde_json::from_value(value) {
        Ok(theme) => Some(theme),
        Err(e) => {
            tracing::warn!(store = slug, error = %e, "stored theme is unreadable, using default");
            None
        }
    }
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a store by exact slug match, active or not.
    ///
    /// No case folding or trimming happens here; slugs are normalized when
    /// the store is created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored slug is invalid.
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, slug, owner_id, name, theme_config, active, created_at, updated_at
            FROM storefront.store
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(Store::try_from).transpose()
    }

    /// Create a store with the given (already normalized) slug and theme.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, theme))]
    pub async fn create(
        &self,
        slug: &StoreSlug,
        name: &str,
        owner_id: OwnerId,
        theme: &ThemeConfig,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO storefront.store (slug, owner_id, name, theme_config)
            VALUES ($1, $2, $3, $4)
            RETURNING id, slug, owner_id, name, theme_config, active, created_at, updated_at
            ",
        )
        .bind(slug)
        .bind(owner_id)
        .bind(name)
        .bind(Json(theme))
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!("slug {slug} is already taken"));
            }
            RepositoryError::Database(e)
        })?;

        Store::try_from(row)
    }

    /// Replace a store's theme.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no store has this slug.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, theme))]
    pub async fn update_theme(&self, slug: &str, theme: &ThemeConfig) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE storefront.store SET theme_config = $2, updated_at = NOW() WHERE slug = $1",
        )
        .bind(slug)
        .bind(Json(theme))
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Activate or soft-deactivate a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no store has this slug.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn set_active(&self, slug: &str, active: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE storefront.store SET active = $2, updated_at = NOW() WHERE slug = $1",
        )
        .bind(slug)
        .bind(active)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl StoreSource for StoreRepository<'_> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Store>, RepositoryError> {
        self.get_by_slug(slug).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_theme_null_is_absent() {
        assert_eq!(decode_theme("shop", None), None);
        assert_eq!(decode_theme("shop", Some(JsonValue::Null)), None);
    }

    #[test]
    fn test_decode_theme_unreadable_is_absent() {
        assert_eq!(decode_theme("shop", Some(json!({"colors": 5}))), None);
    }

    #[test]
    fn test_decode_theme_valid() {
        let theme = decode_theme("shop", Some(json!({"layout_home": []})));
        assert_eq!(theme.map(|t| t.layout_home.len()), Some(0));
    }

    #[test]
    fn test_store_table_checks_mirror_slug_rules() {
        let sql = include_str!("../../migrations/20260301000001_create_store.sql");
        assert!(sql.contains(&format!(
            "char_length(slug) BETWEEN {} AND {}",
            StoreSlug::MIN_LENGTH,
            StoreSlug::MAX_LENGTH
        )));
        for label in StoreSlug::RESERVED {
            assert!(sql.contains(&format!("'{label}'")), "{label} is not reserved in SQL");
        }
    }

    #[test]
    fn test_row_with_bad_slug_is_corruption() {
        let row = StoreRow {
            id: 1,
            slug: "Bad Slug".to_string(),
            owner_id: 1,
            name: "Bad".to_string(),
            theme_config: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(
            Store::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
