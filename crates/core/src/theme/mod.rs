//! Store theme configuration.
//!
//! A [`ThemeConfig`] is a plain value embedded in each store record: brand
//! colors, font references and the home page [`Layout`]. Stores without a
//! persisted theme render with [`ThemeConfig::default`].
//!
//! # Storage format
//!
//! ```json
//! {
//!   "colors": { "gradient_start": "#6366f1", "gradient_end": "#ec4899", "primary": "#111827" },
//!   "typography": { "heading_font": "Inter", "body_font": "Inter" },
//!   "layout_home": [
//!     { "id": "hero", "type": "image_banner", "props": { "heading": "Welcome" } },
//!     { "id": "catalog", "type": "product_grid", "props": { "columns": 4 } }
//!   ]
//! }
//! ```

pub mod block;
pub mod validate;

use serde::{Deserialize, Serialize};

pub use block::{
    Alignment, Block, BlockKind, FeaturedProductProps, ImageBannerProps, KNOWN_BLOCK_TYPES,
    ProductGridProps, RichTextProps, Testimonial, TestimonialsProps,
};
pub use validate::{ThemeIssue, ThemeValidationError, validate_theme_json};

/// Ordered sequence of blocks; order is page order.
pub type Layout = Vec<Block>;

/// A store's visual identity and page layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub colors: ThemeColors,
    pub typography: Typography,
    pub layout_home: Layout,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            colors: ThemeColors::default(),
            typography: Typography::default(),
            layout_home: vec![
                Block::new(
                    "hero",
                    BlockKind::ImageBanner(ImageBannerProps {
                        heading: Some("Welcome to our store".to_string()),
                        cta_label: Some("Shop now".to_string()),
                        cta_url: Some("#catalog".to_string()),
                        ..ImageBannerProps::default()
                    }),
                ),
                Block::new("catalog", BlockKind::ProductGrid(ProductGridProps::default())),
            ],
        }
    }
}

/// Brand colors as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub gradient_start: String,
    pub gradient_end: String,
    pub primary: String,
}

impl ThemeColors {
    pub const DEFAULT_GRADIENT_START: &'static str = "#6366f1";
    pub const DEFAULT_GRADIENT_END: &'static str = "#ec4899";
    pub const DEFAULT_PRIMARY: &'static str = "#111827";

    /// Copy with every non-hex value replaced by its default.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        fn pick(value: &str, fallback: &str) -> String {
            if is_hex_color(value) {
                value.to_owned()
            } else {
                fallback.to_owned()
            }
        }

        Self {
            gradient_start: pick(&self.gradient_start, Self::DEFAULT_GRADIENT_START),
            gradient_end: pick(&self.gradient_end, Self::DEFAULT_GRADIENT_END),
            primary: pick(&self.primary, Self::DEFAULT_PRIMARY),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            gradient_start: Self::DEFAULT_GRADIENT_START.to_string(),
            gradient_end: Self::DEFAULT_GRADIENT_END.to_string(),
            primary: Self::DEFAULT_PRIMARY.to_string(),
        }
    }
}

/// Font family references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
}

impl Typography {
    pub const DEFAULT_FONT: &'static str = "Inter";

    /// Copy with every unsafe font name replaced by the default font.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        fn pick(value: &str) -> String {
            if is_font_name(value) {
                value.to_owned()
            } else {
                Typography::DEFAULT_FONT.to_owned()
            }
        }

        Self {
            heading_font: pick(&self.heading_font),
            body_font: pick(&self.body_font),
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading_font: Self::DEFAULT_FONT.to_string(),
            body_font: Self::DEFAULT_FONT.to_string(),
        }
    }
}

/// `#rgb` or `#rrggbb`.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Letters, digits, spaces and hyphens; nothing that can escape a CSS string.
#[must_use]
pub fn is_font_name(value: &str) -> bool {
    !value.trim().is_empty()
        && value.len() <= 64
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_theme_literal() {
        let theme = ThemeConfig::default();
        let types: Vec<&str> = theme.layout_home.iter().map(Block::type_name).collect();
        assert_eq!(types, vec!["image_banner", "product_grid"]);
        assert_eq!(theme.colors.primary, "#111827");
        assert_eq!(theme.typography.heading_font, "Inter");
    }

    #[test]
    fn test_round_trip_preserves_order_and_props() {
        let stored = json!({
            "colors": {"gradient_start": "#000", "gradient_end": "#ffffff", "primary": "#123456"},
            "typography": {"heading_font": "Playfair Display", "body_font": "Lato"},
            "layout_home": [
                {"id": "b1", "type": "image_banner", "props": {"backgroundImage": "x.jpg", "alignment": "left"}},
                {"id": "b2", "type": "product_grid", "props": {"columns": 4}},
                {"id": "b3", "type": "unknown_widget", "props": {"anything": [1, 2]}},
                {"id": "b4", "type": "product_grid", "props": {"columns": 2, "featuredOnly": true}}
            ]
        });

        let theme: ThemeConfig = serde_json::from_value(stored).unwrap();
        let written = serde_json::to_string(&theme).unwrap();
        let reread: ThemeConfig = serde_json::from_str(&written).unwrap();

        assert_eq!(reread, theme);
        let ids: Vec<&str> = reread.layout_home.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2", "b3", "b4"]);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let theme: ThemeConfig = serde_json::from_value(json!({"layout_home": []})).unwrap();
        assert!(theme.layout_home.is_empty());
        assert_eq!(theme.colors, ThemeColors::default());
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#A1b2C3"));
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ffff"));
        assert!(!is_hex_color("#ggg"));
        assert!(!is_hex_color("red; background: url(x)"));
    }

    #[test]
    fn test_sanitized_colors_and_fonts() {
        let colors = ThemeColors {
            gradient_start: "#abc".to_string(),
            gradient_end: "blue".to_string(),
            primary: "#000000".to_string(),
        }
        .sanitized();
        assert_eq!(colors.gradient_start, "#abc");
        assert_eq!(colors.gradient_end, ThemeColors::DEFAULT_GRADIENT_END);

        let fonts = Typography {
            heading_font: "Comic'; }".to_string(),
            body_font: "Open Sans".to_string(),
        }
        .sanitized();
        assert_eq!(fonts.heading_font, "Inter");
        assert_eq!(fonts.body_font, "Open Sans");
    }
}
