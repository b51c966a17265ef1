//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Subdomain requests ({slug}.{base_domain})
//! GET  /                              - Store home page
//! GET  /products/{id}                 - Product detail
//!
//! # Path-based requests (any host)
//! GET  /s/{slug}                      - Store home page
//! GET  /s/{slug}/products/{id}        - Product detail
//!
//! # API
//! GET  /api/stores/{slug}/theme       - Effective theme config (JSON)
//! ```

pub mod api;
pub mod home;
pub mod products;

use axum::{Router, routing::get};

use crate::db::StoreRepository;
use crate::error::{AppError, Result, set_sentry_store};
use crate::state::AppState;
use crate::tenant::ResolvedStore;

/// Create the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products/{id}", get(products::show))
        .route("/s/{slug}", get(home::home_by_slug))
        .route("/s/{slug}/products/{id}", get(products::show_by_slug))
        .route("/api/stores/{slug}/theme", get(api::theme))
        .fallback(not_found)
}

/// Resolve the store for a request, or fail with 404.
async fn resolve_store(
    state: &AppState,
    host: Option<&str>,
    path_slug: Option<&str>,
) -> Result<ResolvedStore> {
    let repo = StoreRepository::new(state.pool());
    let resolved = state.resolver().resolve(&repo, host, path_slug).await?;
    set_sentry_store(resolved.store.slug.as_str());
    Ok(resolved)
}

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}
