//! `[plugins.tags]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [plugins.tags]
//! enable = true
//! tags_folder = "aux"            # Where the tags page is written (relative to site root)
//! tags_filename = "tags.md"      # Name of the generated page
//! tags_template = "tags.md.j2"   # Custom template (optional, `~` allowed)
//! css_name = "tag"               # Heading class used by the built-in template
//! title = "Tags"                 # Title of the generated page
//! order = "first-seen"           # first-seen | alphabetical
//! buttons = false                # Prepend tag links to every tagged page
//! ```

use crate::config::{BuildSectionConfig, ConfigDiagnostics, FieldPath};
use crate::utils::path::is_within;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Order of tags on the generated page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagOrder {
    /// Order in which tags are first encountered while walking documents.
    #[default]
    FirstSeen,
    /// Case-insensitive alphabetical order.
    Alphabetical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    /// Run the plugin at all.
    pub enable: bool,

    /// Output directory for the generated page. Must be outside `build.content`.
    pub tags_folder: PathBuf,

    /// File name of the generated page.
    pub tags_filename: String,

    /// Custom template; the built-in template is used when unset.
    pub tags_template: Option<PathBuf>,

    /// CSS class attached to tag headings by the built-in template.
    pub css_name: String,

    /// Title of the generated page.
    pub title: String,

    pub order: TagOrder,

    /// Prepend a line of tag links to tagged pages.
    pub buttons: bool,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            tags_folder: "aux".into(),
            tags_filename: "tags.md".into(),
            tags_template: None,
            css_name: "tag".into(),
            title: "Tags".into(),
            order: TagOrder::default(),
            buttons: false,
        }
    }
}

impl TagsConfig {
    pub const FOLDER: FieldPath = FieldPath::new("plugins.tags.tags_folder");
    pub const FILENAME: FieldPath = FieldPath::new("plugins.tags.tags_filename");
    pub const BUTTONS: FieldPath = FieldPath::new("plugins.tags.buttons");

    /// Validate normalized plugin paths against the build section.
    ///
    /// The tags page must land outside the watched content directory, so the
    /// folder may not be inside it and the filename may not climb out of the
    /// folder.
    pub fn validate(&self, build: &BuildSectionConfig, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            if self.buttons {
                diag.warn(Self::BUTTONS, "has no effect while the tags plugin is disabled");
            }
            return;
        }

        if is_within(&self.tags_folder, &build.content) {
            diag.error_with_hint(
                Self::FOLDER,
                format!(
                    "`{}` is inside the content directory",
                    self.tags_folder.display()
                ),
                "use a folder next to the content directory, e.g. `aux`",
            );
        }

        let filename = Path::new(&self.tags_filename);
        let escapes = filename
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if self.tags_filename.trim().is_empty()
            || escapes
            || filename.extension().is_none_or(|ext| ext != "md")
        {
            diag.error_with_hint(
                Self::FILENAME,
                format!("`{}` is not a relative markdown file name", self.tags_filename),
                "use a name like `tags.md`",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(root: &Path) -> BuildSectionConfig {
        BuildSectionConfig {
            content: root.join("content"),
            output: root.join("public"),
            clean: false,
        }
    }

    fn tags(root: &Path, folder: &str) -> TagsConfig {
        TagsConfig {
            tags_folder: root.join(folder),
            ..TagsConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = TagsConfig::default();
        assert!(config.enable);
        assert_eq!(config.tags_folder, PathBuf::from("aux"));
        assert_eq!(config.tags_filename, "tags.md");
        assert!(config.tags_template.is_none());
        assert_eq!(config.css_name, "tag");
        assert_eq!(config.title, "Tags");
        assert_eq!(config.order, TagOrder::FirstSeen);
        assert!(!config.buttons);
    }

    #[test]
    fn test_order_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            order: TagOrder,
        }
        let parsed: Wrapper = toml::from_str("order = \"alphabetical\"").unwrap();
        assert_eq!(parsed.order, TagOrder::Alphabetical);
        let parsed: Wrapper = toml::from_str("order = \"first-seen\"").unwrap();
        assert_eq!(parsed.order, TagOrder::FirstSeen);
        assert!(toml::from_str::<Wrapper>("order = \"random\"").is_err());
    }

    #[test]
    fn test_folder_outside_content() {
        let root = Path::new("/site");
        let mut diag = ConfigDiagnostics::new();
        tags(root, "aux").validate(&build(root), &mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_folder_inside_content_rejected() {
        let root = Path::new("/site");
        for folder in ["content", "content/aux", "content/./tags"] {
            let mut diag = ConfigDiagnostics::new();
            tags(root, folder).validate(&build(root), &mut diag);
            assert_eq!(diag.errors().len(), 1, "{folder}");
            assert_eq!(diag.errors()[0].field, TagsConfig::FOLDER);
            assert!(diag.errors()[0].hint.is_some());
        }
    }

    #[test]
    fn test_bad_filename_rejected() {
        let root = Path::new("/site");
        for name in ["", "tags.html", "/abs/tags.md", "../content/tags.md", "sub/../../tags.md"] {
            let mut config = tags(root, "aux");
            config.tags_filename = name.into();
            let mut diag = ConfigDiagnostics::new();
            config.validate(&build(root), &mut diag);
            assert_eq!(diag.errors()[0].field, TagsConfig::FILENAME, "{name:?}");
        }
    }

    #[test]
    fn test_nested_filename_allowed() {
        let root = Path::new("/site");
        for name in ["tags/index.md", "tags.md"] {
            let mut config = tags(root, "aux");
            config.tags_filename = name.into();
            let mut diag = ConfigDiagnostics::new();
            config.validate(&build(root), &mut diag);
            assert!(!diag.has_errors(), "{name:?}");
        }
    }

    #[test]
    fn test_disabled_skips_checks() {
        let root = Path::new("/site");
        let mut config = tags(root, "content/aux");
        config.enable = false;
        config.buttons = true;
        let mut diag = ConfigDiagnostics::new();
        config.validate(&build(root), &mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
    }
}
