//! Typed layout blocks.
//!
//! Blocks are stored as `{ "id", "type", "props" }` objects. On decode the
//! `type` string selects a [`BlockKind`] variant carrying that kind's typed
//! props. Unrecognised types are kept verbatim in [`BlockKind::Unknown`] so a
//! theme written by a newer release survives a read/write cycle unchanged.
//!
//! Props decode leniently: a missing field takes its default and a field of
//! the wrong shape is replaced by its default, so one bad value never makes a
//! whole theme unreadable. Props that are not an object at all are replaced by
//! the kind's defaults. Unrecognised keys on a known kind are dropped with a
//! warning.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::types::ProductId;

/// One configurable unit of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct Block {
    /// Identifier, unique within its layout.
    pub id: String,
    /// Kind and typed props.
    pub kind: BlockKind,
}

/// The closed set of block kinds, each with its own props.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    ImageBanner(ImageBannerProps),
    ProductGrid(ProductGridProps),
    RichText(RichTextProps),
    FeaturedProduct(FeaturedProductProps),
    Testimonials(TestimonialsProps),
    /// A block whose type has no renderer in this release.
    Unknown {
        /// The stored `type` string.
        block_type: String,
        /// The stored props, untouched.
        props: Value,
    },
}

/// Wire names of every kind this release can render.
pub const KNOWN_BLOCK_TYPES: &[&str] = &[
    ImageBannerProps::TYPE,
    ProductGridProps::TYPE,
    RichTextProps::TYPE,
    FeaturedProductProps::TYPE,
    TestimonialsProps::TYPE,
];

impl Block {
    /// Create a block.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// The wire name of this block's type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

impl BlockKind {
    /// The wire name of this kind.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::ImageBanner(_) => ImageBannerProps::TYPE,
            Self::ProductGrid(_) => ProductGridProps::TYPE,
            Self::RichText(_) => RichTextProps::TYPE,
            Self::FeaturedProduct(_) => FeaturedProductProps::TYPE,
            Self::Testimonials(_) => TestimonialsProps::TYPE,
            Self::Unknown { block_type, .. } => block_type,
        }
    }

    /// Prop keys this kind understands; empty for unknown kinds.
    #[must_use]
    pub const fn prop_names(&self) -> &'static [&'static str] {
        match self {
            Self::ImageBanner(_) => ImageBannerProps::FIELDS,
            Self::ProductGrid(_) => ProductGridProps::FIELDS,
            Self::RichText(_) => RichTextProps::FIELDS,
            Self::FeaturedProduct(_) => FeaturedProductProps::FIELDS,
            Self::Testimonials(_) => TestimonialsProps::FIELDS,
            Self::Unknown { .. } => &[],
        }
    }

    /// Whether this kind is one of [`KNOWN_BLOCK_TYPES`].
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown { .. })
    }

    /// Decode a kind from its stored type name and props.
    #[must_use]
    pub fn decode(block_type: &str, props: Value) -> Self {
        match block_type {
            ImageBannerProps::TYPE => {
                Self::ImageBanner(decode_props(block_type, ImageBannerProps::FIELDS, props))
            }
            ProductGridProps::TYPE => {
                Self::ProductGrid(decode_props(block_type, ProductGridProps::FIELDS, props))
            }
            RichTextProps::TYPE => {
                Self::RichText(decode_props(block_type, RichTextProps::FIELDS, props))
            }
            FeaturedProductProps::TYPE => Self::FeaturedProduct(decode_props(
                block_type,
                FeaturedProductProps::FIELDS,
                props,
            )),
            TestimonialsProps::TYPE => {
                Self::Testimonials(decode_props(block_type, TestimonialsProps::FIELDS, props))
            }
            _ => Self::Unknown {
                block_type: block_type.to_owned(),
                props,
            },
        }
    }

    /// Encode this kind's props back to JSON.
    #[must_use]
    pub fn encode_props(&self) -> Value {
        let encoded = match self {
            Self::ImageBanner(p) => serde_json::to_value(p),
            Self::ProductGrid(p) => serde_json::to_value(p),
            Self::RichText(p) => serde_json::to_value(p),
            Self::FeaturedProduct(p) => serde_json::to_value(p),
            Self::Testimonials(p) => serde_json::to_value(p),
            Self::Unknown { props, .. } => return props.clone(),
        };
        // Plain structs of strings and integers always serialize
        encoded.unwrap_or(Value::Null)
    }
}

/// Storage shape of a block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawBlock {
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) block_type: String,
    #[serde(default)]
    pub(crate) props: Value,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Self {
            kind: BlockKind::decode(&raw.block_type, raw.props),
            id: raw.id,
        }
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        Self {
            block_type: block.kind.type_name().to_owned(),
            props: block.kind.encode_props(),
            id: block.id,
        }
    }
}

/// Keys of `props` outside `fields`.
pub(crate) fn unrecognised_props<'a>(
    fields: &[&str],
    props: &'a Map<String, Value>,
) -> Vec<&'a str> {
    props
        .keys()
        .map(String::as_str)
        .filter(|key| !fields.contains(key))
        .collect()
}

fn decode_props<P: DeserializeOwned + Default>(
    block_type: &str,
    fields: &[&str],
    props: Value,
) -> P {
    // Serde would read an array positionally, so only objects are decoded
    let map = match props {
        Value::Null => return P::default(),
        Value::Object(map) => map,
        _ => {
            tracing::warn!(block_type, "block props are not an object, using defaults");
            return P::default();
        }
    };

    let dropped = unrecognised_props(fields, &map);
    if !dropped.is_empty() {
        tracing::warn!(block_type, ?dropped, "ignoring unrecognised block props");
    }

    serde_json::from_value(Value::Object(map)).unwrap_or_else(|e| {
        tracing::warn!(block_type, error = %e, "block props are malformed, using defaults");
        P::default()
    })
}

/// Deserialize a field, falling back to its default when the stored value has
/// the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "malformed block prop, using default");
        T::default()
    }))
}

/// Horizontal alignment of banner content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    /// CSS class suffix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Full-width image with optional heading and call to action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageBannerProps {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub alignment: Alignment,
}

impl ImageBannerProps {
    pub const TYPE: &'static str = "image_banner";
    pub const FIELDS: &'static [&'static str] = &[
        "backgroundImage",
        "heading",
        "subheading",
        "ctaLabel",
        "ctaUrl",
        "alignment",
    ];
}

/// Grid of the store's products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductGridProps {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_columns")]
    pub columns: u8,
    #[serde(deserialize_with = "lenient_limit")]
    pub limit: u16,
    #[serde(deserialize_with = "lenient")]
    pub featured_only: bool,
}

impl ProductGridProps {
    pub const TYPE: &'static str = "product_grid";
    pub const FIELDS: &'static [&'static str] = &["title", "columns", "limit", "featuredOnly"];
    pub const DEFAULT_COLUMNS: u8 = 4;
    pub const MAX_COLUMNS: u8 = 6;
    pub const DEFAULT_LIMIT: u16 = 8;

    /// Column count clamped to `1..=MAX_COLUMNS`.
    #[must_use]
    pub fn effective_columns(&self) -> u8 {
        self.columns.clamp(1, Self::MAX_COLUMNS)
    }
}

impl Default for ProductGridProps {
    fn default() -> Self {
        Self {
            title: None,
            columns: Self::DEFAULT_COLUMNS,
            limit: Self::DEFAULT_LIMIT,
            featured_only: false,
        }
    }
}

fn lenient_columns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(u8::deserialize(value).unwrap_or(ProductGridProps::DEFAULT_COLUMNS))
}

fn lenient_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(u16::deserialize(value).unwrap_or(ProductGridProps::DEFAULT_LIMIT))
}

/// Heading and plain-text paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RichTextProps {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub body: String,
}

impl RichTextProps {
    pub const TYPE: &'static str = "rich_text";
    pub const FIELDS: &'static [&'static str] = &["heading", "body"];

    /// Body split into paragraphs on blank lines.
    #[must_use]
    pub fn paragraphs(&self) -> Vec<String> {
        self.body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Spotlight on a single product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturedProductProps {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

impl FeaturedProductProps {
    pub const TYPE: &'static str = "featured_product";
    pub const FIELDS: &'static [&'static str] = &["productId", "heading"];
}

/// Customer quotes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialsProps {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub items: Vec<Testimonial>,
}

impl TestimonialsProps {
    pub const TYPE: &'static str = "testimonials";
    pub const FIELDS: &'static [&'static str] = &["title", "items"];
}

/// A single customer quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    #[serde(deserialize_with = "lenient")]
    pub author: String,
    #[serde(deserialize_with = "lenient")]
    pub quote: String,
    #[serde(deserialize_with = "lenient_rating")]
    pub rating: u8,
}

impl Testimonial {
    pub const MAX_RATING: u8 = 5;

    /// Rating clamped to `1..=MAX_RATING`.
    #[must_use]
    pub fn effective_rating(&self) -> u8 {
        self.rating.clamp(1, Self::MAX_RATING)
    }
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            author: String::new(),
            quote: String::new(),
            rating: Self::MAX_RATING,
        }
    }
}

fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(u8::deserialize(value).unwrap_or(Testimonial::MAX_RATING))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn block(value: Value) -> Block {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decodes_known_kind() {
        let b = block(json!({"id": "b1", "type": "image_banner", "props": {"backgroundImage": "x.jpg"}}));
        assert_eq!(b.id, "b1");
        let BlockKind::ImageBanner(props) = b.kind else {
            panic!("expected image banner");
        };
        assert_eq!(props.background_image.as_deref(), Some("x.jpg"));
        assert_eq!(props.alignment, Alignment::Center);
    }

    #[test]
    fn test_unknown_kind_keeps_type_and_props() {
        let b = block(json!({"id": "b3", "type": "unknown_widget", "props": {"x": 1}}));
        assert!(!b.kind.is_known());
        assert_eq!(b.type_name(), "unknown_widget");

        let back = serde_json::to_value(&b).unwrap();
        assert_eq!(back, json!({"id": "b3", "type": "unknown_widget", "props": {"x": 1}}));
    }

    #[test]
    fn test_missing_props_use_defaults() {
        let b = block(json!({"id": "g", "type": "product_grid"}));
        assert_eq!(b.kind, BlockKind::ProductGrid(ProductGridProps::default()));
    }

    #[test]
    fn test_malformed_field_falls_back_per_field() {
        let b = block(json!({
            "id": "g",
            "type": "product_grid",
            "props": {"columns": "four", "limit": 3, "title": 12}
        }));
        let BlockKind::ProductGrid(props) = b.kind else {
            panic!("expected product grid");
        };
        assert_eq!(props.columns, ProductGridProps::DEFAULT_COLUMNS);
        assert_eq!(props.limit, 3);
        assert_eq!(props.title, None);
    }

    #[test]
    fn test_non_object_props_fall_back_entirely() {
        let b = block(json!({"id": "t", "type": "rich_text", "props": ["nope"]}));
        assert_eq!(b.kind, BlockKind::RichText(RichTextProps::default()));

        let b = block(json!({"id": "g", "type": "product_grid", "props": ["Title", 2, 3, true]}));
        assert_eq!(b.kind, BlockKind::ProductGrid(ProductGridProps::default()));

        let b = block(json!({"id": "f", "type": "featured_product", "props": "hello"}));
        assert_eq!(b.kind, BlockKind::FeaturedProduct(FeaturedProductProps::default()));
    }

    #[test]
    fn test_unrecognised_props_are_dropped_and_reported() {
        let props = json!({"heading": "Hi", "colour": "red", "body": "Text", "size": 3});
        let Value::Object(map) = &props else {
            panic!("expected object");
        };
        assert_eq!(
            unrecognised_props(RichTextProps::FIELDS, map),
            vec!["colour", "size"]
        );

        let b = block(json!({"id": "t", "type": "rich_text", "props": props}));
        assert_eq!(
            b.kind,
            BlockKind::RichText(RichTextProps {
                heading: Some("Hi".to_string()),
                body: "Text".to_string(),
            })
        );
    }

    #[test]
    fn test_prop_names_match_encoded_keys() {
        let kind = BlockKind::ImageBanner(ImageBannerProps {
            background_image: Some("x.jpg".to_string()),
            heading: Some("h".to_string()),
            subheading: Some("s".to_string()),
            cta_label: Some("c".to_string()),
            cta_url: Some("/u".to_string()),
            alignment: Alignment::Left,
        });
        let Value::Object(encoded) = kind.encode_props() else {
            panic!("expected object");
        };
        assert!(unrecognised_props(kind.prop_names(), &encoded).is_empty());
        assert_eq!(encoded.len(), kind.prop_names().len());
    }

    #[test]
    fn test_effective_columns_clamped() {
        let props = ProductGridProps {
            columns: 0,
            ..ProductGridProps::default()
        };
        assert_eq!(props.effective_columns(), 1);
        let props = ProductGridProps {
            columns: 12,
            ..ProductGridProps::default()
        };
        assert_eq!(props.effective_columns(), 6);
    }

    #[test]
    fn test_rich_text_paragraphs() {
        let props = RichTextProps {
            heading: None,
            body: "First.\n\n  Second.  \n\n\n\n".to_string(),
        };
        assert_eq!(props.paragraphs(), vec!["First.", "Second."]);
    }

    #[test]
    fn test_testimonial_rating_defaults_and_clamps() {
        let b = block(json!({
            "id": "q",
            "type": "testimonials",
            "props": {"items": [{"author": "Ana", "quote": "Great", "rating": "x"}, {"author": "Bo", "rating": 9}]}
        }));
        let BlockKind::Testimonials(props) = b.kind else {
            panic!("expected testimonials");
        };
        assert_eq!(props.items.len(), 2);
        let [first, second] = props.items.as_slice() else {
            panic!("expected two testimonials");
        };
        assert_eq!(first.rating, 5);
        assert_eq!(second.effective_rating(), 5);
        assert_eq!(second.quote, "");
    }
}
