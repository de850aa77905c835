//! Tags page rendering.
//!
//! Template context:
//!
//! | Name       | Value                                                 |
//! |------------|-------------------------------------------------------|
//! | `tags`     | list of `[tag, pages]` pairs in index order           |
//! | `title`    | page title from config                                |
//! | `css_name` | heading class from config                             |
//!
//! Each page is a map with `title`, `path`, `filename` (same as `path`),
//! `tags`, plus every other frontmatter key of the document.

use serde_json::{Value as JsonValue, json};

use super::{TagIndex, TagsError};
use crate::page::{Document, FrontMatterError, JsonMap, MarkdownMetaExtractor};
use crate::template::Template;

/// Page-level settings passed to the template.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub title: &'a str,
    pub css_name: &'a str,
}

/// Render the tags page.
///
/// The result always starts with a front matter block. When the template
/// does not open one, a block carrying `title` is prepended. A block the
/// template opens itself must be valid, otherwise the page would carry two.
pub fn render_page(
    index: &TagIndex<'_>,
    template: &Template,
    options: RenderOptions<'_>,
) -> Result<String, TagsError> {
    let text = template
        .render(&context(index, options))
        .map_err(TagsError::Render)?;

    match MarkdownMetaExtractor.extract_map(&text) {
        Ok(Some(_)) => Ok(text),
        // An unclosed leading `---` is a thematic break, not a block.
        Ok(None) | Err(FrontMatterError::Unterminated) => {
            // JSON strings are valid YAML double-quoted scalars.
            let title = JsonValue::from(options.title);
            Ok(format!("---\ntitle: {title}\n---\n\n{text}"))
        }
        Err(e) => Err(TagsError::PageFrontMatter(e)),
    }
}

fn context(index: &TagIndex<'_>, options: RenderOptions<'_>) -> JsonMap {
    let mut context = JsonMap::new();
    context.insert("tags".into(), index_value(index));
    context.insert("title".into(), options.title.into());
    context.insert("css_name".into(), options.css_name.into());
    context
}

/// The index as a list of `[tag, pages]` pairs.
fn index_value(index: &TagIndex<'_>) -> JsonValue {
    index
        .iter()
        .map(|entry| {
            let pages: Vec<JsonValue> = entry.documents.iter().map(|doc| page_value(doc)).collect();
            json!([entry.tag, pages])
        })
        .collect()
}

/// A document as templates see it.
pub fn page_value(document: &Document) -> JsonValue {
    let mut page = JsonMap::new();
    page.insert("title".into(), document.title().into());
    page.insert("path".into(), document.path.as_str().into());
    page.insert("filename".into(), document.path.as_str().into());
    page.insert("tags".into(), document.tags().into());

    for (key, value) in &document.meta.extra {
        page.entry(key.as_str()).or_insert_with(|| value.clone());
    }
    JsonValue::Object(page)
}
