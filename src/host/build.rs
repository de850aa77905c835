//! Build runner.

use anyhow::{Context, Result};
use std::fs;

use super::{File, Files, Page, Plugin};
use crate::config::SiteConfig;
use crate::page::{MarkdownMetaExtractor, PageMeta};
use crate::{debug, log};

/// Summary of a finished build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Files staged into the output directory.
    pub files: usize,
    /// Markdown pages among them.
    pub pages: usize,
}

/// Runs plugins over the content tree and stages the result.
pub struct Builder<'a> {
    config: &'a SiteConfig,
    plugins: Vec<Box<dyn Plugin>>,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            plugins: Vec::new(),
        }
    }

    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the whole lifecycle once.
    pub fn run(mut self) -> Result<BuildReport> {
        let config = self.config;

        for plugin in &mut self.plugins {
            plugin
                .on_config(config)
                .with_context(|| format!("plugin `{}` rejected the configuration", plugin.name()))?;
        }

        let output = &config.build.output;
        if config.build.clean && output.exists() {
            debug!("build"; "cleaning {}", output.display());
            fs::remove_dir_all(output)
                .with_context(|| format!("Failed to clean `{}`", output.display()))?;
        }

        let mut files = Files::collect(&config.build.content, output)?;
        debug!("build"; "collected {} files", files.len());

        for plugin in &mut self.plugins {
            plugin
                .on_files(&mut files, config)
                .with_context(|| format!("plugin `{}` failed", plugin.name()))?;
        }

        let mut report = BuildReport::default();
        for file in files.iter() {
            if file.is_markdown() {
                self.stage_page(file)?;
                report.pages += 1;
            } else {
                copy_file(file)?;
            }
            report.files += 1;
        }

        Ok(report)
    }

    /// Stage a markdown page, letting plugins rewrite its body.
    ///
    /// The frontmatter block is kept byte for byte. Malformed frontmatter
    /// is passed through untouched; plugins reading metadata report it.
    /// Pages that are not UTF-8 are copied as they are.
    fn stage_page(&self, file: &File) -> Result<()> {
        let src = file.abs_src_path();
        let bytes = fs::read(&src).with_context(|| format!("Failed to read `{}`", src.display()))?;
        let Ok(source) = String::from_utf8(bytes) else {
            debug!("build"; "{} is not UTF-8, copying verbatim", file.src_path);
            return copy_file(file);
        };

        let (meta, body) = match MarkdownMetaExtractor.extract_frontmatter(&source) {
            Ok(Some((meta, body))) => (meta, body),
            _ => (PageMeta::default(), source.as_str()),
        };
        let frontmatter = &source[..source.len() - body.len()];

        let page = Page { file, meta: &meta };
        let mut markdown = body.to_string();
        for plugin in &self.plugins {
            markdown = plugin
                .on_page_markdown(markdown, &page, self.config)
                .with_context(|| format!("plugin `{}` failed on `{}`", plugin.name(), file.src_path))?;
        }

        write_output(file, &format!("{frontmatter}{markdown}"))
    }
}

fn write_output(file: &File, content: &str) -> Result<()> {
    let dest = file.abs_dest_path();
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create `{}`", parent.display()))?;
    }
    fs::write(&dest, content).with_context(|| format!("Failed to write `{}`", dest.display()))
}

fn copy_file(file: &File) -> Result<()> {
    let (src, dest) = (file.abs_src_path(), file.abs_dest_path());
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create `{}`", parent.display()))?;
    }
    fs::copy(&src, &dest)
        .with_context(|| format!("Failed to copy `{}` to `{}`", src.display(), dest.display()))?;
    Ok(())
}

impl BuildReport {
    pub fn log(&self, config: &SiteConfig) {
        log!(
            "build";
            "staged {} ({}) into {}",
            crate::utils::plural_count(self.files, "file"),
            crate::utils::plural_count(self.pages, "page"),
            config.root_relative(&config.build.output).display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_site_config;
    use std::path::Path;
    use tempfile::TempDir;

    struct Shout;

    impl Plugin for Shout {
        fn name(&self) -> &'static str {
            "shout"
        }

        fn on_page_markdown(
            &self,
            markdown: String,
            page: &Page<'_>,
            _config: &SiteConfig,
        ) -> Result<String> {
            Ok(format!("{}|{}", page.meta.title.as_deref().unwrap_or("-"), markdown.to_uppercase()))
        }
    }

    struct Reject;

    impl Plugin for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn on_config(&mut self, _config: &SiteConfig) -> Result<()> {
            anyhow::bail!("nope")
        }
    }

    fn site(root: &Path) -> SiteConfig {
        let content = root.join("content");
        fs::create_dir_all(content.join("img")).unwrap();
        fs::write(content.join("index.md"), "---\ntitle: Home\n---\nhello\n").unwrap();
        fs::write(content.join("img/logo.svg"), "<svg/>").unwrap();
        test_site_config(root, "")
    }

    #[test]
    fn test_stages_files_verbatim() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());

        let report = Builder::new(&config).run().unwrap();
        assert_eq!(report, BuildReport { files: 2, pages: 1 });

        let public = dir.path().join("public");
        assert_eq!(
            fs::read_to_string(public.join("index.md")).unwrap(),
            "---\ntitle: Home\n---\nhello\n"
        );
        assert_eq!(fs::read_to_string(public.join("img/logo.svg")).unwrap(), "<svg/>");
    }

    #[test]
    fn test_page_markdown_hook_keeps_frontmatter() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());

        Builder::new(&config).plugin(Shout).run().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("public/index.md")).unwrap(),
            "---\ntitle: Home\n---\nHome|HELLO\n"
        );
    }

    #[test]
    fn test_non_utf8_page_copied_verbatim() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());
        let bytes = b"---\ntitle: Latin\n---\n\xff\xfe\n";
        fs::write(dir.path().join("content/latin.md"), bytes).unwrap();

        let report = Builder::new(&config).plugin(Shout).run().unwrap();
        assert_eq!(report.pages, 2);
        assert_eq!(fs::read(dir.path().join("public/latin.md")).unwrap(), bytes);
    }

    #[test]
    fn test_config_error_aborts_before_output() {
        let dir = TempDir::new().unwrap();
        let config = site(dir.path());

        let err = Builder::new(&config).plugin(Reject).run().unwrap_err();
        assert!(format!("{err:#}").contains("nope"));
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let dir = TempDir::new().unwrap();
        let mut config = site(dir.path());
        let stale = dir.path().join("public/stale.md");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        Builder::new(&config).run().unwrap();
        assert!(stale.exists());

        config.build.clean = true;
        Builder::new(&config).run().unwrap();
        assert!(!stale.exists());
        assert!(dir.path().join("public/index.md").exists());
    }
}
