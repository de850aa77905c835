//! Tag index page generation.
//!
//! Reads the `tags` list from every document's frontmatter, groups
//! documents by tag and renders an auxiliary page listing them.
//!
//! # Pipeline
//!
//! ```text
//! Files ──► Document::parse ──► TagIndex::build ──► render ──► AuxWriter ──► Files
//!           (per page)          (first-seen order)  (template) (tags folder)  (injected)
//! ```
//!
//! [`TagsPlugin`] drives the pipeline from the host lifecycle hooks.

mod error;
mod index;
mod plugin;
mod render;
mod write;

pub use error::TagsError;
pub use index::{TagEntry, TagIndex};
pub use plugin::{TagsPlugin, collect_documents};
pub use render::{RenderOptions, page_value, render_page};
pub use write::AuxWriter;
