//! Per-request render context.

use std::borrow::Cow;

use storehive_core::{ProductId, ThemeConfig};

use crate::models::{Product, Store};

/// Everything a block renderer may read while rendering one page.
///
/// Built once per request and borrowed immutably by every render function;
/// nothing flows back into the store record.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// The store's theme, or [`ThemeConfig::default`] if it never saved one.
    pub theme: Cow<'a, ThemeConfig>,
    pub store: &'a Store,
    /// Published products, in display order.
    pub products: &'a [Product],
    /// The request came in on the store's own subdomain.
    pub is_subdomain: bool,
}

impl<'a> RenderContext<'a> {
    /// Seed a context from a resolved store and its products.
    #[must_use]
    pub fn new(store: &'a Store, products: &'a [Product], is_subdomain: bool) -> Self {
        let theme = store
            .theme_config
            .as_ref()
            .map_or_else(|| Cow::Owned(ThemeConfig::default()), Cow::Borrowed);

        Self {
            theme,
            store,
            products,
            is_subdomain,
        }
    }

    /// Link to the store's home page.
    #[must_use]
    pub fn home_url(&self) -> String {
        if self.is_subdomain {
            "/".to_string()
        } else {
            format!("/s/{}", self.store.slug)
        }
    }

    /// Link to one of the store's products.
    #[must_use]
    pub fn product_url(&self, id: ProductId) -> String {
        if self.is_subdomain {
            format!("/products/{id}")
        } else {
            format!("/s/{}/products/{id}", self.store.slug)
        }
    }

    /// CSS custom properties for the page, with unsafe values replaced.
    #[must_use]
    pub fn style(&self) -> ThemeStyle {
        let colors = self.theme.colors.sanitized();
        let typography = self.theme.typography.sanitized();

        ThemeStyle {
            gradient_start: colors.gradient_start,
            gradient_end: colors.gradient_end,
            primary: colors.primary,
            heading_font: typography.heading_font,
            body_font: typography.body_font,
        }
    }
}

/// Sanitized theme values for the page `<style>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStyle {
    pub gradient_start: String,
    pub gradient_end: String,
    pub primary: String,
    pub heading_font: String,
    pub body_font: String,
}

#[cfg(test)]
mod tests {
    use storehive_core::theme::ThemeColors;

    use super::*;
    use crate::test_support::store_fixture;

    #[test]
    fn test_missing_theme_uses_default() {
        let store = store_fixture(1, "mystore");
        let ctx = RenderContext::new(&store, &[], false);
        assert!(matches!(ctx.theme, Cow::Owned(_)));
        assert_eq!(*ctx.theme, ThemeConfig::default());
    }

    #[test]
    fn test_persisted_theme_is_borrowed() {
        let mut store = store_fixture(1, "mystore");
        let mut theme = ThemeConfig::default();
        theme.layout_home.clear();
        store.theme_config = Some(theme);

        let ctx = RenderContext::new(&store, &[], false);
        assert!(matches!(ctx.theme, Cow::Borrowed(_)));
        assert!(ctx.theme.layout_home.is_empty());
    }

    #[test]
    fn test_links_follow_request_mode() {
        let store = store_fixture(1, "mystore");
        let native = RenderContext::new(&store, &[], true);
        assert_eq!(native.home_url(), "/");
        assert_eq!(native.product_url(ProductId::new(7)), "/products/7");

        let by_path = RenderContext::new(&store, &[], false);
        assert_eq!(by_path.home_url(), "/s/mystore");
        assert_eq!(by_path.product_url(ProductId::new(7)), "/s/mystore/products/7");
    }

    #[test]
    fn test_style_replaces_unsafe_values() {
        let mut store = store_fixture(1, "mystore");
        let mut theme = ThemeConfig::default();
        theme.colors.primary = "red;}body{display:none".to_string();
        theme.typography.body_font = "Lato".to_string();
        store.theme_config = Some(theme);

        let style = RenderContext::new(&store, &[], false).style();
        assert_eq!(style.primary, ThemeColors::DEFAULT_PRIMARY);
        assert_eq!(style.body_font, "Lato");
    }
}
