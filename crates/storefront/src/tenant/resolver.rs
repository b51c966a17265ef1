//! Store resolution from request identity.

use std::future::Future;

use thiserror::Error;

use super::host::subdomain_slug;
use crate::db::RepositoryError;
use crate::models::Store;

/// Source of store records, keyed by exact slug.
///
/// Implemented by [`crate::db::StoreRepository`]; tests use in-memory lists.
pub trait StoreSource {
    /// Find a store whose slug equals `slug` byte for byte, active or not.
    fn find_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Store>, RepositoryError>> + Send;
}

/// Errors from [`StoreResolver::resolve`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No slug in the request, no store with that slug, or the store is inactive.
    #[error("no active store for {}", .0.as_deref().unwrap_or("request"))]
    NotFound(Option<String>),

    /// The store lookup itself failed.
    #[error("store lookup failed: {0}")]
    Source(#[from] RepositoryError),
}

/// A store selected for the current request.
#[derive(Debug, Clone)]
pub struct ResolvedStore {
    pub store: Store,
    /// The request arrived on the store's own subdomain; links should be
    /// host-relative rather than `/s/{slug}`-prefixed.
    pub is_subdomain: bool,
}

/// Maps request hosts and path slugs to active stores.
#[derive(Debug, Clone)]
pub struct StoreResolver {
    base_domain: String,
}

impl StoreResolver {
    /// Create a resolver for tenants under `base_domain`.
    #[must_use]
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self {
            base_domain: base_domain.into().to_ascii_lowercase(),
        }
    }

    /// Resolve the store for a request.
    ///
    /// The explicit path slug wins over the subdomain. The request counts as a
    /// native subdomain request when the host's subdomain names the same
    /// store. The path slug is looked up verbatim: `MyStore` does not find
    /// `mystore`.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` if no slug can be derived, no store has
    /// that slug, or the store is inactive. Returns `ResolveError::Source` if
    /// the lookup fails.
    pub async fn resolve<S: StoreSource>(
        &self,
        source: &S,
        host: Option<&str>,
        path_slug: Option<&str>,
    ) -> Result<ResolvedStore, ResolveError> {
        let subdomain = host.and_then(|h| subdomain_slug(h, &self.base_domain));

        let slug = match (path_slug, subdomain.as_ref()) {
            (Some(path), _) => path,
            (None, Some(sub)) => sub.as_str(),
            (None, None) => return Err(ResolveError::NotFound(None)),
        };

        let store = source
            .find_by_slug(slug)
            .await?
            .filter(|store| store.active)
            .ok_or_else(|| {
                tracing::debug!(slug, "no active store for slug");
                ResolveError::NotFound(Some(slug.to_owned()))
            })?;

        let is_subdomain = subdomain.is_some_and(|sub| sub.as_str() == store.slug.as_str());

        Ok(ResolvedStore {
            store,
            is_subdomain,
        })
    }
}
