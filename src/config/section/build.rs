//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! content = "content"   # Source documents (relative to site root)
//! output = "public"     # Staged output (relative to site root)
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::path::is_within;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content source directory.
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            clean: false,
        }
    }
}

impl BuildSectionConfig {
    pub const CONTENT: FieldPath = FieldPath::new("build.content");
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");

    /// Validate normalized build paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                Self::CONTENT,
                format!("content directory `{}` does not exist", self.content.display()),
                "create it or point `build.content` at your documents",
            );
        }

        if is_within(&self.output, &self.content) || is_within(&self.content, &self.output) {
            diag.error_with_hint(
                Self::OUTPUT,
                "output and content directories must not contain each other",
                "use a sibling directory such as `public`",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn section(root: &std::path::Path, content: &str, output: &str) -> BuildSectionConfig {
        BuildSectionConfig {
            content: root.join(content),
            output: root.join(output),
            clean: false,
        }
    }

    #[test]
    fn test_defaults() {
        let config = BuildSectionConfig::default();
        assert_eq!(config.content, PathBuf::from("content"));
        assert_eq!(config.output, PathBuf::from("public"));
        assert!(!config.clean);
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();

        let mut diag = ConfigDiagnostics::new();
        section(dir.path(), "content", "public").validate(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_validate_missing_content() {
        let dir = TempDir::new().unwrap();
        let mut diag = ConfigDiagnostics::new();
        section(dir.path(), "content", "public").validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, BuildSectionConfig::CONTENT);
    }

    #[test]
    fn test_validate_nested_output() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();

        let mut diag = ConfigDiagnostics::new();
        section(dir.path(), "content", "content/public").validate(&mut diag);
        assert_eq!(diag.errors()[0].field, BuildSectionConfig::OUTPUT);
    }
}
