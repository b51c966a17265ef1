//! Store slug type.
//!
//! A slug identifies a tenant in both subdomain (`{slug}.example.com`) and
//! path-based (`/s/{slug}`) routing. Normalization happens once, when a store
//! is created; lookups compare slugs verbatim.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`StoreSlug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input is shorter than the minimum length.
    #[error("slug must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input is longer than a DNS label allows.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The input starts or ends with a hyphen, or contains `--`.
    #[error("slug has a misplaced hyphen")]
    MisplacedHyphen,
    /// The slug collides with a platform-owned name.
    #[error("slug {0:?} is reserved")]
    Reserved(String),
}

/// A validated, lower-case, URL-safe store slug.
///
/// ## Constraints
///
/// - Length: 3-63 characters (a single DNS label)
/// - Characters: `a-z`, `0-9`, `-`
/// - No leading, trailing or doubled hyphen
/// - Not one of [`StoreSlug::RESERVED`]
///
/// ## Examples
///
/// ```
/// use storehive_core::StoreSlug;
///
/// assert!(StoreSlug::parse("my-store").is_ok());
/// assert!(StoreSlug::parse("MyStore").is_err()); // upper case is not normalized here
/// assert_eq!(StoreSlug::normalize(" My Store ").unwrap().as_str(), "my-store");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct StoreSlug(String);

impl StoreSlug {
    /// Minimum slug length.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum slug length (RFC 1035 label limit).
    pub const MAX_LENGTH: usize = 63;

    /// Labels owned by the platform itself.
    pub const RESERVED: &'static [&'static str] =
        &["www", "api", "admin", "app", "static", "health", "mail"];

    /// Parse an already-normalized slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the input violates any of the type's constraints.
    /// Upper-case input is rejected rather than folded.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.len() < Self::MIN_LENGTH {
            return Err(SlugError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }

        if s.starts_with('-') || s.ends_with('-') || s.contains("--") {
            return Err(SlugError::MisplacedHyphen);
        }

        if Self::RESERVED.contains(&s) {
            return Err(SlugError::Reserved(s.to_owned()));
        }

        Ok(Self(s.to_owned()))
    }

    /// Normalize free-form input into a slug, then validate it.
    ///
    /// Trims surrounding whitespace, lower-cases ASCII letters and turns runs
    /// of whitespace or underscores into a single hyphen. Only store creation
    /// should call this.
    ///
    /// # Errors
    ///
    /// Returns an error if the normalized value is still not a valid slug.
    pub fn normalize(input: &str) -> Result<Self, SlugError> {
        let mut out = String::with_capacity(input.len());
        let mut pending_hyphen = false;

        for c in input.trim().chars() {
            if c.is_whitespace() || c == '_' || c == '-' {
                pending_hyphen = !out.is_empty();
                continue;
            }
            if pending_hyphen {
                out.push('-');
                pending_hyphen = false;
            }
            out.push(c.to_ascii_lowercase());
        }

        Self::parse(&out)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the slug and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoreSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StoreSlug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StoreSlug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StoreSlug> for String {
    fn from(slug: StoreSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for StoreSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for StoreSlug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for StoreSlug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // The table's CHECK constraint keeps stored slugs lower-case
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for StoreSlug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(StoreSlug::parse("mystore").is_ok());
        assert!(StoreSlug::parse("my-store-2").is_ok());
        assert!(StoreSlug::parse("abc").is_ok());
        assert!(StoreSlug::parse(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_parse_rejects_upper_case() {
        assert_eq!(
            StoreSlug::parse("MyStore"),
            Err(SlugError::InvalidCharacter('M'))
        );
    }

    #[test]
    fn test_parse_length_bounds() {
        assert!(matches!(
            StoreSlug::parse("ab"),
            Err(SlugError::TooShort { .. })
        ));
        assert!(matches!(
            StoreSlug::parse(&"a".repeat(64)),
            Err(SlugError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_hyphen_placement() {
        assert_eq!(StoreSlug::parse("-shop"), Err(SlugError::MisplacedHyphen));
        assert_eq!(StoreSlug::parse("shop-"), Err(SlugError::MisplacedHyphen));
        assert_eq!(StoreSlug::parse("my--shop"), Err(SlugError::MisplacedHyphen));
    }

    #[test]
    fn test_parse_reserved() {
        assert!(matches!(StoreSlug::parse("www"), Err(SlugError::Reserved(_))));
        assert!(matches!(StoreSlug::parse("admin"), Err(SlugError::Reserved(_))));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(StoreSlug::normalize("MyStore").unwrap().as_str(), "mystore");
        assert_eq!(
            StoreSlug::normalize("  Sunny  Side_Shop ").unwrap().as_str(),
            "sunny-side-shop"
        );
        assert_eq!(StoreSlug::normalize("--a-b--c--").unwrap().as_str(), "a-b-c");
    }

    #[test]
    fn test_normalize_still_validates() {
        assert!(matches!(
            StoreSlug::normalize("café shop"),
            Err(SlugError::InvalidCharacter('é'))
        ));
    }

    #[test]
    fn test_serde_rejects_invalid() {
        assert!(serde_json::from_str::<StoreSlug>("\"Bad Slug\"").is_err());
        let slug: StoreSlug = serde_json::from_str("\"good-slug\"").unwrap();
        assert_eq!(slug.as_str(), "good-slug");
    }
}
