//! Write-time theme validation.
//!
//! Reads are lenient (see [`super::block`]); writes are strict. Before a theme
//! is persisted it must pass [`validate_theme_json`], which reports every
//! problem a lenient read would have papered over: unknown block types,
//! duplicate ids, props that would be replaced by defaults, and colors or
//! fonts the renderer would refuse.

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use super::block::{BlockKind, RawBlock};
use super::{ThemeConfig, is_font_name, is_hex_color};

/// A single problem found in a theme document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeIssue {
    /// The document root is not a JSON object.
    NotAnObject,
    /// `colors` or `typography` is present but not an object.
    SectionNotObject(String),
    /// `layout_home` is not an array of `{id, type, props}` objects.
    MalformedLayout(String),
    /// A block has an empty id.
    EmptyBlockId { index: usize },
    /// Two blocks share an id.
    DuplicateBlockId(String),
    /// A block type has no renderer.
    UnknownBlockType { id: String, block_type: String },
    /// A block's props are not an object.
    PropsNotObject { id: String },
    /// A prop is not part of the block type's schema.
    UnknownProp { id: String, prop: String },
    /// A prop has the wrong shape and would be replaced by its default.
    InvalidProp { id: String, prop: String },
    /// A color is not `#rgb` / `#rrggbb`.
    InvalidColor { field: String },
    /// A font reference is empty or contains unsafe characters.
    InvalidFont { field: String },
}

impl fmt::Display for ThemeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "theme must be a JSON object"),
            Self::SectionNotObject(section) => write!(f, "{section} must be an object"),
            Self::MalformedLayout(reason) => write!(f, "layout_home is malformed: {reason}"),
            Self::EmptyBlockId { index } => write!(f, "block #{index} has an empty id"),
            Self::DuplicateBlockId(id) => write!(f, "block id {id:?} is used more than once"),
            Self::UnknownBlockType { id, block_type } => {
                write!(f, "block {id:?} has unknown type {block_type:?}")
            }
            Self::PropsNotObject { id } => write!(f, "block {id:?} props must be an object"),
            Self::UnknownProp { id, prop } => write!(f, "block {id:?} has unknown prop {prop:?}"),
            Self::InvalidProp { id, prop } => write!(f, "block {id:?} prop {prop:?} is invalid"),
            Self::InvalidColor { field } => write!(f, "colors.{field} must be a hex color"),
            Self::InvalidFont { field } => write!(f, "typography.{field} is not a valid font name"),
        }
    }
}

/// Errors returned by [`validate_theme_json`].
#[derive(Debug, thiserror::Error)]
pub enum ThemeValidationError {
    /// The input is not JSON.
    #[error("theme is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input is JSON but violates the theme schema.
    #[error("theme has {} problem(s): {}", .0.len(), format_issues(.0))]
    Invalid(Vec<ThemeIssue>),
}

fn format_issues(issues: &[ThemeIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Strictly validate a theme document and decode it.
///
/// With `allow_unknown_blocks`, blocks of unregistered types are accepted
/// (they will be skipped at render time) instead of reported.
///
/// # Errors
///
/// Returns `ThemeValidationError::Parse` for non-JSON input and
/// `ThemeValidationError::Invalid` listing every issue found otherwise.
pub fn validate_theme_json(
    json: &str,
    allow_unknown_blocks: bool,
) -> Result<ThemeConfig, ThemeValidationError> {
    let value: Value = serde_json::from_str(json)?;
    let Some(root) = value.as_object() else {
        return Err(ThemeValidationError::Invalid(vec![ThemeIssue::NotAnObject]));
    };

    let mut issues = Vec::new();
    check_strings(root, "colors", &mut issues, is_hex_color, |field| {
        ThemeIssue::InvalidColor { field }
    });
    check_strings(root, "typography", &mut issues, is_font_name, |field| {
        ThemeIssue::InvalidFont { field }
    });

    if let Some(layout) = root.get("layout_home") {
        match serde_json::from_value::<Vec<RawBlock>>(layout.clone()) {
            Ok(blocks) => check_blocks(&blocks, allow_unknown_blocks, &mut issues),
            Err(e) => issues.push(ThemeIssue::MalformedLayout(e.to_string())),
        }
    }

    if !issues.is_empty() {
        return Err(ThemeValidationError::Invalid(issues));
    }

    Ok(serde_json::from_value(value)?)
}

fn check_strings(
    root: &Map<String, Value>,
    section: &str,
    issues: &mut Vec<ThemeIssue>,
    is_valid: fn(&str) -> bool,
    issue: fn(String) -> ThemeIssue,
) {
    let Some(value) = root.get(section) else {
        return;
    };
    let Some(fields) = value.as_object() else {
        issues.push(ThemeIssue::SectionNotObject(section.to_owned()));
        return;
    };
    for (field, value) in fields {
        if !value.as_str().is_some_and(is_valid) {
            issues.push(issue(field.clone()));
        }
    }
}

fn check_blocks(blocks: &[RawBlock], allow_unknown: bool, issues: &mut Vec<ThemeIssue>) {
    let mut seen = HashSet::new();

    for (index, raw) in blocks.iter().enumerate() {
        if raw.id.trim().is_empty() {
            issues.push(ThemeIssue::EmptyBlockId { index });
        } else if !seen.insert(raw.id.as_str()) {
            issues.push(ThemeIssue::DuplicateBlockId(raw.id.clone()));
        }

        let kind = BlockKind::decode(&raw.block_type, raw.props.clone());
        if !kind.is_known() {
            if !allow_unknown {
                issues.push(ThemeIssue::UnknownBlockType {
                    id: raw.id.clone(),
                    block_type: raw.block_type.clone(),
                });
            }
            continue;
        }

        let input = match &raw.props {
            Value::Null => continue,
            Value::Object(map) => map,
            _ => {
                issues.push(ThemeIssue::PropsNotObject { id: raw.id.clone() });
                continue;
            }
        };

        // A known prop survived decoding only if it re-encodes to the same value
        let encoded = kind.encode_props();
        for (prop, value) in input {
            if value.is_null() {
                continue;
            }
            if !kind.prop_names().contains(&prop.as_str()) {
                issues.push(ThemeIssue::UnknownProp {
                    id: raw.id.clone(),
                    prop: prop.clone(),
                });
            } else if encoded.get(prop) != Some(value) {
                issues.push(ThemeIssue::InvalidProp {
                    id: raw.id.clone(),
                    prop: prop.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn issues(json: &str, allow_unknown: bool) -> Vec<ThemeIssue> {
        match validate_theme_json(json, allow_unknown) {
            Err(ThemeValidationError::Invalid(issues)) => issues,
            other => panic!("expected validation issues, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_theme_decodes() {
        let theme = validate_theme_json(
            r##"{
                "colors": {"gradient_start": "#000", "gradient_end": "#fff", "primary": "#123456"},
                "layout_home": [
                    {"id": "b1", "type": "image_banner", "props": {"backgroundImage": "x.jpg"}},
                    {"id": "b2", "type": "product_grid", "props": {"columns": 4}}
                ]
            }"##,
            false,
        )
        .unwrap();
        assert_eq!(theme.layout_home.len(), 2);
    }

    #[test]
    fn test_unknown_type_rejected_unless_allowed() {
        let json = r#"{"layout_home": [{"id": "b3", "type": "unknown_widget", "props": {}}]}"#;
        assert_eq!(
            issues(json, false),
            vec![ThemeIssue::UnknownBlockType {
                id: "b3".to_string(),
                block_type: "unknown_widget".to_string()
            }]
        );
        let theme = validate_theme_json(json, true).unwrap();
        assert_eq!(theme.layout_home.len(), 1);
    }

    #[test]
    fn test_duplicate_and_empty_ids() {
        let json = r#"{"layout_home": [
            {"id": "a", "type": "rich_text"},
            {"id": "a", "type": "rich_text"},
            {"id": " ", "type": "rich_text"}
        ]}"#;
        assert_eq!(
            issues(json, false),
            vec![
                ThemeIssue::DuplicateBlockId("a".to_string()),
                ThemeIssue::EmptyBlockId { index: 2 },
            ]
        );
    }

    #[test]
    fn test_prop_problems() {
        let json = r#"{"layout_home": [
            {"id": "g", "type": "product_grid", "props": {"columns": "four", "colour": "red", "title": 12}}
        ]}"#;
        let found = issues(json, false);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&ThemeIssue::InvalidProp {
            id: "g".to_string(),
            prop: "title".to_string()
        }));
        assert!(found.contains(&ThemeIssue::InvalidProp {
            id: "g".to_string(),
            prop: "columns".to_string()
        }));
        assert!(found.contains(&ThemeIssue::UnknownProp {
            id: "g".to_string(),
            prop: "colour".to_string()
        }));
    }

    #[test]
    fn test_props_must_be_object() {
        let json = r#"{"layout_home": [{"id": "t", "type": "rich_text", "props": "hello"}]}"#;
        assert_eq!(
            issues(json, false),
            vec![ThemeIssue::PropsNotObject { id: "t".to_string() }]
        );
    }

    #[test]
    fn test_bad_colors_and_fonts() {
        let json = r#"{"colors": {"primary": "red"}, "typography": {"body_font": 12}}"#;
        assert_eq!(
            issues(json, false),
            vec![
                ThemeIssue::InvalidColor {
                    field: "primary".to_string()
                },
                ThemeIssue::InvalidFont {
                    field: "body_font".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_sections_must_be_objects() {
        assert_eq!(
            issues(r#"{"colors": 5}"#, false),
            vec![ThemeIssue::SectionNotObject("colors".to_string())]
        );
        assert_eq!(
            issues(r#"{"colors": {}, "typography": ["Inter"]}"#, false),
            vec![ThemeIssue::SectionNotObject("typography".to_string())]
        );

        let err = validate_theme_json(r#"{"colors": null}"#, false).unwrap_err();
        assert_eq!(err.to_string(), "theme has 1 problem(s): colors must be an object");
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            validate_theme_json("{", false),
            Err(ThemeValidationError::Parse(_))
        ));
        assert_eq!(issues("[]", false), vec![ThemeIssue::NotAnObject]);
    }
}
