//! Store home page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::state::AppState;
use crate::tenant::RequestHost;
use crate::theme::{RenderContext, ThemeStyle, render_html};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub store_name: String,
    pub home_url: String,
    pub style: ThemeStyle,
    /// Rendered section fragments, in layout order.
    pub sections: Vec<String>,
}

/// Display a store's home page, resolved from the subdomain.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    RequestHost(host): RequestHost,
) -> Result<HomeTemplate> {
    render_home(&state, host.as_deref(), None).await
}

/// Display a store's home page, resolved from the path.
#[instrument(skip(state))]
pub async fn home_by_slug(
    State(state): State<AppState>,
    RequestHost(host): RequestHost,
    Path(slug): Path<String>,
) -> Result<HomeTemplate> {
    render_home(&state, host.as_deref(), Some(&slug)).await
}

async fn render_home(
    state: &AppState,
    host: Option<&str>,
    path_slug: Option<&str>,
) -> Result<HomeTemplate> {
    let resolved = super::resolve_store(state, host, path_slug).await?;
    let products = ProductRepository::new(state.pool())
        .list_published(resolved.store.id)
        .await?;

    let ctx = RenderContext::new(&resolved.store, &products, resolved.is_subdomain);
    let sections = render_html(&ctx.theme.layout_home, &ctx);

    tracing::debug!(
        store = %resolved.store.slug,
        sections = sections.len(),
        products = products.len(),
        "rendered home page"
    );

    Ok(HomeTemplate {
        store_name: resolved.store.name.clone(),
        home_url: ctx.home_url(),
        style: ctx.style(),
        sections,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{product_fixture, store_fixture};

    #[test]
    fn test_home_template_embeds_sections_and_theme() {
        let store = store_fixture(1, "mystore");
        let products = vec![product_fixture(3, 1, "Candle", true)];
        let ctx = RenderContext::new(&store, &products, true);

        let page = HomeTemplate {
            store_name: store.name.clone(),
            home_url: ctx.home_url(),
            style: ctx.style(),
            sections: render_html(&ctx.theme.layout_home, &ctx),
        };
        let html = page.render().unwrap();

        assert!(html.contains("--color-gradient-start: #6366f1"));
        assert!(html.contains("class=\"section banner"));
        assert!(html.contains("href=\"/products/3\""));
        let banner = html.find("class=\"section banner").unwrap();
        let grid = html.find("class=\"section product-grid").unwrap();
        assert!(banner < grid);
    }
}
