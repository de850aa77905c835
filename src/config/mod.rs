//! Site configuration management for `tola.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   └── plugins/   # [plugins.tags]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section           | Purpose                                   |
//! |-------------------|-------------------------------------------|
//! | `[build]`         | Content and output directories            |
//! | `[plugins.tags]`  | Tag index page (folder, template, order)  |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildSectionConfig, PluginsConfig, TagOrder, TagsConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing tola.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Plugin settings
    #[serde(default)]
    pub plugins: PluginsConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. The project root is
    /// the config file's parent directory; all paths are resolved against it.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cli.config, &cwd)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        config.apply_cli(cli);

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.normalize_paths(&root);
        config.validate()?;

        crate::debug!("config"; "using {}", config.config_path.display());
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply CLI overrides on top of the file values.
    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => {
                crate::logger::set_verbose(build_args.verbose);
                self.build.clean = build_args.clean;
            }
            Commands::Query { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to the root directory.
    pub fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);

        self.build.content = normalize_path(&root.join(&self.build.content));
        self.build.output = normalize_path(&root.join(&self.build.output));

        let tags = &mut self.plugins.tags;
        tags.tags_folder = normalize_path(&root.join(&tags.tags_folder));
        if let Some(template) = tags.tags_template.take() {
            tags.tags_template = Some(Self::expand_path(&template, &root));
        }

        self.root = root;
    }

    /// Normalize a user path with tilde expansion.
    fn expand_path(path: &Path, root: &Path) -> PathBuf {
        let raw = path.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        normalize_path(&root.join(expanded))
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the build section.
    ///
    /// Plugins validate their own sections when they are configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag);
        diag.print_warnings();
        diag.into_result()
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config and resolve it against `root`, as if `root/tola.toml` held `content`.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_site_config(root: &Path, content: &str) -> SiteConfig {
    let (mut parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.config_path = root.join("tola.toml");
    parsed.normalize_paths(root);
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_toml() {
        assert!(SiteConfig::parse_with_ignored("[build\ncontent = \"docs\"").is_err());
    }

    #[test]
    fn test_defaults_from_empty_file() {
        let (config, ignored) = SiteConfig::parse_with_ignored("").unwrap();
        assert!(ignored.is_empty());
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.plugins.tags.tags_filename, "tags.md");
        assert_eq!(config.plugins.tags.order, TagOrder::FirstSeen);
    }

    #[test]
    fn test_plugin_section() {
        let (config, _) = SiteConfig::parse_with_ignored(
            "[plugins.tags]\ntags_folder = \"generated\"\ntitle = \"Topics\"\norder = \"alphabetical\"\nbuttons = true",
        )
        .unwrap();
        let tags = &config.plugins.tags;
        assert_eq!(tags.tags_folder, PathBuf::from("generated"));
        assert_eq!(tags.title, "Topics");
        assert_eq!(tags.order, TagOrder::Alphabetical);
        assert!(tags.buttons);
        assert_eq!(tags.css_name, "tag");
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[build]\ncontent = \"docs\"\n[plugins.tags]\ntag_folder = \"x\"\n[unknown_section]\nfield = 1";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.build.content, PathBuf::from("docs"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
        assert!(ignored.iter().any(|f| f.contains("tag_folder")));
    }

    #[test]
    fn test_normalize_paths() {
        let dir = TempDir::new().unwrap();
        let config = test_site_config(
            dir.path(),
            "[plugins.tags]\ntags_template = \"templates/tags.md.j2\"",
        );
        let root = normalize_path(dir.path());

        assert_eq!(config.root, root);
        assert_eq!(config.build.content, root.join("content"));
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.plugins.tags.tags_folder, root.join("aux"));
        assert_eq!(
            config.plugins.tags.tags_template,
            Some(root.join("templates/tags.md.j2"))
        );
        assert_eq!(
            config.root_relative(&config.plugins.tags.tags_folder),
            PathBuf::from("aux")
        );
    }

    #[test]
    fn test_validate_reports_missing_content() {
        let dir = TempDir::new().unwrap();
        let config = test_site_config(dir.path(), "");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Diagnostics(_))
        ));

        fs::create_dir(dir.path().join("content")).unwrap();
        assert!(config.validate().is_ok());
    }
}
