//! Rendered page sections.
//!
//! Each [`Section`] variant is an askama view built by a block renderer. The
//! views hold display-ready values only (formatted prices, resolved links,
//! sanitized URLs); templates do no further logic beyond layout.

use askama::Template;

use storehive_core::ProductId;

use super::context::RenderContext;
use super::registry::safe_url;
use crate::models::Product;

/// One rendered block of a page.
#[derive(Debug, Clone)]
pub enum Section {
    ImageBanner(ImageBannerSection),
    ProductGrid(ProductGridSection),
    RichText(RichTextSection),
    FeaturedProduct(FeaturedProductSection),
    Testimonials(TestimonialsSection),
}

impl Section {
    /// Block type this section was rendered from.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ImageBanner(_) => "image_banner",
            Self::ProductGrid(_) => "product_grid",
            Self::RichText(_) => "rich_text",
            Self::FeaturedProduct(_) => "featured_product",
            Self::Testimonials(_) => "testimonials",
        }
    }

    /// Id of the block this section was rendered from.
    #[must_use]
    pub fn block_id(&self) -> &str {
        match self {
            Self::ImageBanner(s) => &s.block_id,
            Self::ProductGrid(s) => &s.block_id,
            Self::RichText(s) => &s.block_id,
            Self::FeaturedProduct(s) => &s.block_id,
            Self::Testimonials(s) => &s.block_id,
        }
    }

    /// Render this section's HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns the askama error if the template fails to render.
    pub fn to_html(&self) -> askama::Result<String> {
        match self {
            Self::ImageBanner(s) => s.render(),
            Self::ProductGrid(s) => s.render(),
            Self::RichText(s) => s.render(),
            Self::FeaturedProduct(s) => s.render(),
            Self::Testimonials(s) => s.render(),
        }
    }
}

/// A call-to-action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cta {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Template)]
#[template(path = "sections/image_banner.html")]
pub struct ImageBannerSection {
    pub block_id: String,
    pub background_image: Option<String>,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub cta: Option<Cta>,
    pub alignment: &'static str,
}

/// Product summary for grids and spotlights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub image: Option<String>,
    pub url: String,
}

impl ProductCard {
    /// Build a card with a link appropriate for the current request.
    #[must_use]
    pub fn new(product: &Product, ctx: &RenderContext<'_>) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.display(),
            image: product.images.iter().find_map(|i| safe_url(i)),
            url: ctx.product_url(product.id),
        }
    }
}

#[derive(Debug, Clone, Template)]
#[template(path = "sections/product_grid.html")]
pub struct ProductGridSection {
    pub block_id: String,
    pub title: Option<String>,
    pub columns: u8,
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, Template)]
#[template(path = "sections/rich_text.html")]
pub struct RichTextSection {
    pub block_id: String,
    pub heading: Option<String>,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Template)]
#[template(path = "sections/featured_product.html")]
pub struct FeaturedProductSection {
    pub block_id: String,
    pub heading: Option<String>,
    /// `None` when the store has no products to feature.
    pub product: Option<ProductCard>,
    pub description: Option<String>,
}

/// A quote with its star rating spelled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialView {
    pub author: String,
    pub quote: String,
    pub rating: u8,
    pub stars: String,
}

#[derive(Debug, Clone, Template)]
#[template(path = "sections/testimonials.html")]
pub struct TestimonialsSection {
    pub block_id: String,
    pub title: Option<String>,
    pub items: Vec<TestimonialView>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{product_fixture, store_fixture};

    #[test]
    fn test_image_banner_escapes_text() {
        let section = Section::ImageBanner(ImageBannerSection {
            block_id: "hero".to_string(),
            background_image: Some("https://cdn.example.com/x.jpg".to_string()),
            heading: Some("<script>alert(1)</script>".to_string()),
            subheading: None,
            cta: Some(Cta {
                label: "Shop".to_string(),
                url: "/s/mystore".to_string(),
            }),
            alignment: "left",
        });

        let html = section.to_html().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("<h1 class=\"banner__heading\">&"));
        assert!(html.contains("alert(1)"));
        assert!(html.contains("https://cdn.example.com/x.jpg"));
        assert!(html.contains("banner--left"));
    }

    #[test]
    fn test_product_grid_lists_cards() {
        let section = Section::ProductGrid(ProductGridSection {
            block_id: "catalog".to_string(),
            title: Some("New in".to_string()),
            columns: 3,
            products: vec![ProductCard {
                id: ProductId::new(4),
                name: "Mug".to_string(),
                price: "$12.00".to_string(),
                image: None,
                url: "/products/4".to_string(),
            }],
        });

        let html = section.to_html().unwrap();
        assert_eq!(section.kind(), "product_grid");
        assert!(html.contains("id=\"catalog\""));
        assert!(html.contains("grid--cols-3"));
        assert!(html.contains("/products/4"));
        assert!(html.contains("$12.00"));
    }

    #[test]
    fn test_product_card_skips_unsafe_images() {
        let store = store_fixture(1, "mystore");
        let mut product = product_fixture(4, 1, "Mug", false);
        product.images = vec![
            "javascript:alert(1)".to_string(),
            "https://cdn.example.com/mug.jpg".to_string(),
        ];
        let ctx = RenderContext::new(&store, &[], false);

        let card = ProductCard::new(&product, &ctx);
        assert_eq!(card.image.as_deref(), Some("https://cdn.example.com/mug.jpg"));

        product.images = vec!["data:image/png;base64,AAAA".to_string()];
        assert_eq!(ProductCard::new(&product, &ctx).image, None);
    }

    #[test]
    fn test_featured_product_empty_state() {
        let section = Section::FeaturedProduct(FeaturedProductSection {
            block_id: "spot".to_string(),
            heading: None,
            product: None,
            description: None,
        });
        let html = section.to_html().unwrap();
        assert!(html.contains("No products yet"));
    }
}
