//! Block registry: maps block kinds to render functions.
//!
//! The registry is a static match, not a mutable table. Render functions are
//! pure: they read the block and the [`RenderContext`] and build a
//! [`Section`], substituting safe defaults for anything unusable.

use std::borrow::Cow;

use storehive_core::theme::{
    FeaturedProductProps, ImageBannerProps, KNOWN_BLOCK_TYPES, ProductGridProps, RichTextProps,
    Testimonial, TestimonialsProps,
};
use storehive_core::{Block, BlockKind};
use url::Url;

use super::context::RenderContext;
use super::sections::{
    Cta, FeaturedProductSection, ImageBannerSection, ProductCard, ProductGridSection,
    RichTextSection, Section, TestimonialView, TestimonialsSection,
};

/// Signature shared by every block renderer.
pub type RenderFn = fn(&Block, &RenderContext<'_>) -> Section;

/// Look up the renderer for a block kind. Unknown kinds have none.
#[must_use]
pub fn resolve(kind: &BlockKind) -> Option<RenderFn> {
    match kind {
        BlockKind::ImageBanner(_) => Some(render_image_banner),
        BlockKind::ProductGrid(_) => Some(render_product_grid),
        BlockKind::RichText(_) => Some(render_rich_text),
        BlockKind::FeaturedProduct(_) => Some(render_featured_product),
        BlockKind::Testimonials(_) => Some(render_testimonials),
        BlockKind::Unknown { .. } => None,
    }
}

/// Whether a raw block type string has a renderer.
#[must_use]
pub fn is_registered(block_type: &str) -> bool {
    KNOWN_BLOCK_TYPES.contains(&block_type)
}

/// Typed props carried by a [`BlockKind`] variant.
trait KindProps: Clone + Default {
    fn from_kind(kind: &BlockKind) -> Option<&Self>;
}

macro_rules! kind_props {
    ($($variant:ident => $props:ty),* $(,)?) => {
        $(
            impl KindProps for $props {
                fn from_kind(kind: &BlockKind) -> Option<&Self> {
                    match kind {
                        BlockKind::$variant(props) => Some(props),
                        _ => None,
                    }
                }
            }
        )*
    };
}

kind_props! {
    ImageBanner => ImageBannerProps,
    ProductGrid => ProductGridProps,
    RichText => RichTextProps,
    FeaturedProduct => FeaturedProductProps,
    Testimonials => TestimonialsProps,
}

/// The block's props, or defaults if a renderer is handed the wrong kind.
fn props_of<P: KindProps>(block: &Block) -> Cow<'_, P> {
    P::from_kind(&block.kind).map_or_else(|| Cow::Owned(P::default()), Cow::Borrowed)
}

/// Non-blank text, trimmed.
fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Accept relative links and absolute `http(s)` URLs; drop everything else.
///
/// Protocol-relative `//host` links are dropped since they leave the store.
pub fn safe_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("//") || raw.contains('\\') {
        return None;
    }
    if raw.starts_with('/') || raw.starts_with('#') || raw.starts_with('?') {
        return Some(raw.to_owned());
    }

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw.to_owned()),
        Ok(_) => None,
        // No scheme at all: a relative path such as `sale/summer`
        Err(url::ParseError::RelativeUrlWithoutBase) if !raw.contains(':') => {
            Some(raw.to_owned())
        }
        Err(_) => None,
    }
}

fn render_image_banner(block: &Block, _ctx: &RenderContext<'_>) -> Section {
    let props = props_of::<ImageBannerProps>(block);

    let cta = text(props.cta_label.as_deref()).and_then(|label| {
        let url = props.cta_url.as_deref().and_then(safe_url)?;
        Some(Cta { label, url })
    });

    Section::ImageBanner(ImageBannerSection {
        block_id: block.id.clone(),
        background_image: props.background_image.as_deref().and_then(safe_url),
        heading: text(props.heading.as_deref()),
        subheading: text(props.subheading.as_deref()),
        cta,
        alignment: props.alignment.as_str(),
    })
}

fn render_product_grid(block: &Block, ctx: &RenderContext<'_>) -> Section {
    let props = props_of::<ProductGridProps>(block);

    let products = ctx
        .products
        .iter()
        .filter(|p| !props.featured_only || p.featured)
        .take(usize::from(props.limit))
        .map(|p| ProductCard::new(p, ctx))
        .collect();

    Section::ProductGrid(ProductGridSection {
        block_id: block.id.clone(),
        title: text(props.title.as_deref()),
        columns: props.effective_columns(),
        products,
    })
}

fn render_rich_text(block: &Block, _ctx: &RenderContext<'_>) -> Section {
    let props = props_of::<RichTextProps>(block);

    Section::RichText(RichTextSection {
        block_id: block.id.clone(),
        heading: text(props.heading.as_deref()),
        paragraphs: props.paragraphs(),
    })
}

fn render_featured_product(block: &Block, ctx: &RenderContext<'_>) -> Section {
    let props = props_of::<FeaturedProductProps>(block);

    // Named product, then first featured, then first of any
    let product = props
        .product_id
        .and_then(|id| ctx.products.iter().find(|p| p.id == id))
        .or_else(|| ctx.products.iter().find(|p| p.featured))
        .or_else(|| ctx.products.first());

    Section::FeaturedProduct(FeaturedProductSection {
        block_id: block.id.clone(),
        heading: text(props.heading.as_deref()),
        product: product.map(|p| ProductCard::new(p, ctx)),
        description: product.and_then(|p| text(p.description.as_deref())),
    })
}

fn render_testimonials(block: &Block, _ctx: &RenderContext<'_>) -> Section {
    let props = props_of::<TestimonialsProps>(block);

    let items = props
        .items
        .iter()
        .filter(|t| !t.quote.trim().is_empty())
        .map(|t| {
            let rating = t.effective_rating();
            let filled = usize::from(rating);
            let empty = usize::from(Testimonial::MAX_RATING - rating);
            TestimonialView {
                author: t.author.trim().to_owned(),
                quote: t.quote.trim().to_owned(),
                rating,
                stars: format!("{}{}", "★".repeat(filled), "☆".repeat(empty)),
            }
        })
        .collect();

    Section::Testimonials(TestimonialsSection {
        block_id: block.id.clone(),
        title: text(props.title.as_deref()),
        items,
    })
}
