//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::tenant::StoreResolver;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds only the connection pool and the
/// read-only tenant resolver, so requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    resolver: StoreResolver,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: &StorefrontConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                resolver: StoreResolver::new(config.base_domain.clone()),
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the tenant resolver for the configured base domain.
    #[must_use]
    pub fn resolver(&self) -> &StoreResolver {
        &self.inner.resolver
    }
}
