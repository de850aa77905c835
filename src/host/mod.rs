//! Minimal build host.
//!
//! Discovers the content tree, runs plugin lifecycle hooks and stages the
//! resulting file set into the output directory. Markdown is not converted:
//! pages are copied with their (possibly plugin-rewritten) body.
//!
//! # Lifecycle
//!
//! ```text
//! on_config ──► Files::collect ──► on_files ──► on_page_markdown (per page) ──► stage
//! ```

mod build;
mod file;
mod plugin;

pub use build::{BuildReport, Builder};
pub use file::{File, Files};
pub use plugin::{Page, Plugin};
