//! YAML frontmatter extraction.
//!
//! A frontmatter block must start on the very first line of the document
//! with a line consisting solely of `---`, and end with the next such line:
//!
//! ```text
//! ---
//! title: Welcome
//! tags: [testing, unimportant]
//! ---
//! # Body starts here
//! ```
//!
//! Anything else (no opening delimiter, `---` further down the page) means
//! the document has no frontmatter and the whole text is body.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

use super::{JsonMap, PageMeta};

/// Frontmatter delimiter line.
pub const DELIMITER: &str = "---";

/// Frontmatter that is present but cannot be used.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("frontmatter opened with `---` but never closed")]
    Unterminated,

    #[error("invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("frontmatter must be a mapping, found {0}")]
    NotMapping(&'static str),

    #[error("invalid frontmatter field: {0}")]
    Field(#[from] serde_json::Error),
}

/// Markdown metadata extractor for YAML (`---`) frontmatter
pub struct MarkdownMetaExtractor;

impl MarkdownMetaExtractor {
    /// Extract frontmatter and return (metadata, body).
    ///
    /// Returns `Ok(None)` when the document has no frontmatter.
    pub fn extract_frontmatter<'a>(
        &self,
        content: &'a str,
    ) -> Result<Option<(PageMeta, &'a str)>, FrontMatterError> {
        match self.extract_map(content)? {
            Some((map, body)) => Ok(Some((PageMeta::from_map(map)?, body))),
            None => Ok(None),
        }
    }

    /// Extract the raw frontmatter mapping without interpreting any field.
    pub fn extract_map<'a>(
        &self,
        content: &'a str,
    ) -> Result<Option<(JsonMap, &'a str)>, FrontMatterError> {
        match Self::split(content)? {
            Some((yaml, body)) => Ok(Some((Self::parse_yaml(yaml)?, body))),
            None => Ok(None),
        }
    }

    /// Split content into `(frontmatter, body)`.
    ///
    /// The frontmatter slice excludes both delimiter lines; the body starts
    /// right after the closing delimiter's line break.
    fn split(content: &str) -> Result<Option<(&str, &str)>, FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let (first, rest) = match content.find('\n') {
            Some(end) => (&content[..end], &content[end + 1..]),
            None => (content, ""),
        };
        if !is_delimiter(first) {
            return Ok(None);
        }

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if is_delimiter(line) {
                let body = &rest[offset + line.len()..];
                return Ok(Some((&rest[..offset], body)));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    /// Parse YAML frontmatter into a JSON map, preserving key order.
    fn parse_yaml(yaml: &str) -> Result<JsonMap, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(JsonMap::new());
        }

        match serde_yaml::from_str::<YamlValue>(yaml)? {
            YamlValue::Null => Ok(JsonMap::new()),
            YamlValue::Mapping(mapping) => Ok(mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect()),
            other => Err(FrontMatterError::NotMapping(yaml_kind(&other))),
        }
    }
}

/// A delimiter line is exactly `---`, ignoring trailing whitespace and `\r`.
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Convert a YAML mapping key to a string key.
fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".into(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Convert a YAML value to its JSON equivalent.
///
/// Tagged values (`!custom value`) keep only the inner value.
fn yaml_to_json(value: YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::from(i)
            } else if let Some(u) = n.as_u64() {
                JsonValue::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(JsonValue::Null, JsonValue::Number)
            }
        }
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(seq) => JsonValue::Array(seq.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => JsonValue::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a list",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}
