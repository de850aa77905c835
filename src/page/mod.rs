//! Page types: frontmatter extraction, metadata and documents.

mod document;
mod frontmatter;
mod meta;

pub use document::{Document, UNTITLED};
pub use frontmatter::{FrontMatterError, MarkdownMetaExtractor};
pub use meta::PageMeta;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
