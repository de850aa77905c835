//! Plugin lifecycle trait.

use anyhow::Result;

use super::{File, Files};
use crate::config::SiteConfig;
use crate::page::PageMeta;

/// A markdown page being staged.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub file: &'a File,
    pub meta: &'a PageMeta,
}

/// Build lifecycle hooks. Every hook defaults to a no-op.
///
/// Hooks run in this order, once per build:
/// 1. `on_config` - resolve and validate settings
/// 2. `on_files` - inspect or extend the collected file set
/// 3. `on_page_markdown` - rewrite each markdown page body
pub trait Plugin {
    fn name(&self) -> &'static str;

    fn on_config(&mut self, _config: &SiteConfig) -> Result<()> {
        Ok(())
    }

    fn on_files(&mut self, _files: &mut Files, _config: &SiteConfig) -> Result<()> {
        Ok(())
    }

    fn on_page_markdown(
        &self,
        markdown: String,
        _page: &Page<'_>,
        _config: &SiteConfig,
    ) -> Result<String> {
        Ok(markdown)
    }
}
