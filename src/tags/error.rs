//! Tags plugin error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::page::FrontMatterError;
use crate::template::TemplateError;

/// Fatal errors of the tags plugin. Any of these aborts the build.
///
/// Per-document frontmatter problems are not here: they are logged and
/// the document is treated as untagged.
#[derive(Debug, Error)]
pub enum TagsError {
    #[error("tags template `{path}` could not be read")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("tags template `{path}` is invalid")]
    TemplateSyntax {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("failed to render tags page")]
    Render(#[source] TemplateError),

    #[error("rendered tags page opens a front matter block that cannot be used")]
    PageFrontMatter(#[source] FrontMatterError),

    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("tags plugin used before `on_config`")]
    NotConfigured,
}
