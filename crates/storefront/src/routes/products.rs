//! Product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use storehive_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;
use crate::tenant::RequestHost;
use crate::theme::registry::safe_url;
use crate::theme::{RenderContext, ThemeStyle};

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub name: String,
    pub price: String,
    pub paragraphs: Vec<String>,
    pub images: Vec<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let paragraphs = product
            .description
            .as_deref()
            .unwrap_or_default()
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            name: product.name.clone(),
            price: product.price.display(),
            paragraphs,
            images: product.images.iter().filter_map(|i| safe_url(i)).collect(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub store_name: String,
    pub home_url: String,
    pub style: ThemeStyle,
    pub product: ProductView,
}

/// Display a product, store resolved from the subdomain.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequestHost(host): RequestHost,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    render_product(&state, host.as_deref(), None, &id).await
}

/// Display a product, store resolved from the path.
#[instrument(skip(state))]
pub async fn show_by_slug(
    State(state): State<AppState>,
    RequestHost(host): RequestHost,
    Path((slug, id)): Path<(String, String)>,
) -> Result<ProductShowTemplate> {
    render_product(&state, host.as_deref(), Some(&slug), &id).await
}

async fn render_product(
    state: &AppState,
    host: Option<&str>,
    path_slug: Option<&str>,
    raw_id: &str,
) -> Result<ProductShowTemplate> {
    // A non-numeric id can never match, so it is a 404 rather than a 400
    let product_id: ProductId = raw_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("product {raw_id}")))?;

    let resolved = super::resolve_store(state, host, path_slug).await?;
    let product = ProductRepository::new(state.pool())
        .get_published(resolved.store.id, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let ctx = RenderContext::new(&resolved.store, &[], resolved.is_subdomain);

    Ok(ProductShowTemplate {
        store_name: resolved.store.name.clone(),
        home_url: ctx.home_url(),
        style: ctx.style(),
        product: ProductView::from(&product),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{product_fixture, store_fixture};

    #[test]
    fn test_product_view_splits_description_and_filters_images() {
        let mut product = product_fixture(1, 1, "Lamp", false);
        product.description = Some("Warm light.\n\nHandmade.".to_string());
        product.images.push("javascript:alert(1)".to_string());

        let view = ProductView::from(&product);
        assert_eq!(view.paragraphs, vec!["Warm light.", "Handmade."]);
        assert_eq!(view.images, vec!["https://cdn.example.com/1.jpg"]);
        assert_eq!(view.price, "$10.00");
    }

    #[test]
    fn test_product_page_links_home() {
        let store = store_fixture(1, "mystore");
        let ctx = RenderContext::new(&store, &[], false);
        let page = ProductShowTemplate {
            store_name: store.name.clone(),
            home_url: ctx.home_url(),
            style: ctx.style(),
            product: ProductView::from(&product_fixture(1, 1, "Lamp", false)),
        };

        let html = page.render().unwrap();
        assert!(html.contains("<h1>Lamp</h1>"));
        assert!(html.contains("href=\"/s/mystore\""));
    }
}
