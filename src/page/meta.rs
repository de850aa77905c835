//! Page metadata from YAML frontmatter.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value as JsonValue;

use super::JsonMap;

/// Stringify a scalar metadata value.
///
/// Returns `None` for null, arrays and objects.
fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize title, accepting any scalar (`title: 2024` is a valid title)
fn deserialize_title<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => scalar_to_string(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom("`title` must be a string")),
    }
}

/// Deserialize tags from any of the shapes authors actually write:
///
/// - `null` or absent -> empty
/// - block list / inline sequence of scalars
/// - a single string, split on commas (`tags: a, b`)
///
/// Null items inside a sequence are skipped; nested lists or maps are rejected.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::String(s)) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()),
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| {
                scalar_to_string(item)
                    .ok_or_else(|| D::Error::custom("`tags` items must be strings"))
            })
            .collect(),
        Some(value @ (JsonValue::Number(_) | JsonValue::Bool(_))) => {
            Ok(scalar_to_string(&value).into_iter().collect())
        }
        Some(JsonValue::Object(_)) => Err(D::Error::custom("`tags` must be a list of strings")),
    }
}

/// Page metadata from frontmatter in Markdown files
///
/// # Standard Fields
///
/// | Field   | Type          | Description              |
/// |---------|---------------|--------------------------|
/// | `title` | `String`      | Page title               |
/// | `tags`  | `Vec<String>` | Categorization tags      |
///
/// # Custom Fields (`extra`)
///
/// Any additional fields are captured in `extra` as raw JSON, in the
/// order they appear in the frontmatter. Custom tag templates read them
/// as `page.<field>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    #[serde(deserialize_with = "deserialize_title")]
    pub title: Option<String>,
    /// Tags for categorizing the page, in frontmatter order.
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    /// Additional user-defined fields.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl PageMeta {
    /// Build metadata from a parsed frontmatter mapping.
    pub fn from_map(map: JsonMap) -> serde_json::Result<Self> {
        serde_json::from_value(JsonValue::Object(map))
    }
}
