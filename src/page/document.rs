//! Source documents with parsed frontmatter.

use super::{MarkdownMetaExtractor, PageMeta};
use crate::log;

/// Display title for documents without a `title` field.
pub const UNTITLED: &str = "untitled";

/// One source content file, parsed once per build.
///
/// `path` is relative to the content root and always `/`-separated, so it
/// can be used directly as a markdown link target.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: String,
    pub meta: PageMeta,
}

impl Document {
    pub fn new(path: impl Into<String>, meta: PageMeta) -> Self {
        Self {
            path: path.into(),
            meta,
        }
    }

    /// Parse a document from its source text, returning it with its body.
    ///
    /// Malformed frontmatter never fails the build: a warning is logged and
    /// the document is treated as having no metadata, with the whole source
    /// as body.
    pub fn parse(path: impl Into<String>, source: &str) -> (Self, &str) {
        let path = path.into();
        match MarkdownMetaExtractor.extract_frontmatter(source) {
            Ok(Some((meta, body))) => (Self::new(path, meta), body),
            Ok(None) => (Self::new(path, PageMeta::default()), source),
            Err(e) => {
                log!("warning"; "{}: {}, treating page as untagged", path, e);
                (Self::new(path, PageMeta::default()), source)
            }
        }
    }

    /// Get title, falling back to [`UNTITLED`] if not set.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Tags in frontmatter order.
    #[inline]
    pub fn tags(&self) -> &[String] {
        &self.meta.tags
    }
}
