//! JSON API route handlers.

use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use storehive_core::ThemeConfig;

use crate::error::Result;
use crate::state::AppState;

/// Return the theme a store renders with: its own, or the default.
///
/// Inactive and unknown stores are 404, same as the pages.
#[instrument(skip(state))]
pub async fn theme(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ThemeConfig>> {
    let resolved = super::resolve_store(&state, None, Some(&slug)).await?;
    Ok(Json(resolved.store.theme_config.unwrap_or_default()))
}
