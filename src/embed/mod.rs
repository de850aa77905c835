//! Embedded static resources.
//!
//! - `TAGS_TEMPLATE` - built-in template for the tags page

/// Built-in tags page template, used when `tags_template` is unset.
pub const TAGS_TEMPLATE: &str = include_str!("tags.md");

/// Display name of the built-in template in diagnostics.
pub const TAGS_TEMPLATE_NAME: &str = "<built-in tags.md>";
