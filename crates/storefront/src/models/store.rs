//! Store (tenant) domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storehive_core::{OwnerId, StoreId, StoreSlug, ThemeConfig};

/// A tenant's storefront.
///
/// The theme is embedded by value; `None` means the store never saved one and
/// renders with [`ThemeConfig::default`].
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Lower-case, URL-safe slug used for subdomain and path routing.
    pub slug: StoreSlug,
    /// Owning account (managed by the hosted auth provider).
    pub owner_id: OwnerId,
    /// Display name.
    pub name: String,
    /// Persisted theme, if any.
    pub theme_config: Option<ThemeConfig>,
    /// Inactive stores are never rendered.
    pub active: bool,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
    /// When the store was last updated.
    pub updated_at: DateTime<Utc>,
}
