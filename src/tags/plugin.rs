//! Tags plugin lifecycle.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{AuxWriter, RenderOptions, TagIndex, TagsError, render_page};
use crate::config::{ConfigDiagnostics, SiteConfig, TagOrder};
use crate::embed::{TAGS_TEMPLATE, TAGS_TEMPLATE_NAME};
use crate::host::{Files, Page, Plugin};
use crate::page::{Document, PageMeta};
use crate::template::Template;
use crate::utils::{plural_count, slug::slugify};
use crate::{debug, log};

/// Progress of one `on_files` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildPhase {
    Configured,
    DocumentsCollected,
    IndexBuilt,
    Rendered,
    Written,
    Injected,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configured => "configured",
            Self::DocumentsCollected => "documents collected",
            Self::IndexBuilt => "index built",
            Self::Rendered => "rendered",
            Self::Written => "written",
            Self::Injected => "injected",
        };
        f.write_str(name)
    }
}

/// Settings resolved once by `on_config`.
#[derive(Debug)]
struct Resolved {
    writer: AuxWriter,
    template: Template,
    title: String,
    css_name: String,
    order: TagOrder,
    buttons: bool,
    /// Link target of tag buttons, without the anchor.
    page_url: String,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Unconfigured,
    Disabled,
    Ready(Resolved),
}

/// Generates the tags page from document frontmatter.
#[derive(Debug, Default)]
pub struct TagsPlugin {
    state: State,
}

impl TagsPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve settings, validate them and load the template.
    ///
    /// Nothing is written here, so a bad template or folder fails the
    /// build before any output exists.
    pub fn configure(&mut self, config: &SiteConfig) -> Result<(), TagsError> {
        let tags = &config.plugins.tags;
        let mut diag = ConfigDiagnostics::new();
        tags.validate(&config.build, &mut diag);
        diag.print_warnings();
        diag.into_result()?;

        if !tags.enable {
            debug!("tags"; "disabled");
            self.state = State::Disabled;
            return Ok(());
        }

        let template = load_template(tags.tags_template.as_deref())?;
        let page_url = format!(
            "/{}",
            Path::new(&tags.tags_filename)
                .with_extension("html")
                .to_string_lossy()
        );

        self.state = State::Ready(Resolved {
            writer: AuxWriter::new(&tags.tags_folder, &tags.tags_filename),
            template,
            title: tags.title.clone(),
            css_name: tags.css_name.clone(),
            order: tags.order,
            buttons: tags.buttons,
            page_url,
        });
        debug!("tags"; "phase: {}", BuildPhase::Configured);
        Ok(())
    }

    /// Run one build cycle: index every document and inject the tags page.
    ///
    /// All intermediate state lives in this call.
    pub fn generate(&self, files: &mut Files, config: &SiteConfig) -> Result<(), TagsError> {
        let resolved = match &self.state {
            State::Unconfigured => return Err(TagsError::NotConfigured),
            State::Disabled => return Ok(()),
            State::Ready(resolved) => resolved,
        };

        let documents = collect_documents(files)?;
        debug!("tags"; "phase: {} ({})", BuildPhase::DocumentsCollected, plural_count(documents.len(), "document"));

        let index = TagIndex::build(&documents).sorted(resolved.order);
        debug!("tags"; "phase: {} ({})", BuildPhase::IndexBuilt, plural_count(index.len(), "tag"));

        let options = RenderOptions {
            title: &resolved.title,
            css_name: &resolved.css_name,
        };
        let text = render_page(&index, &resolved.template, options)?;
        debug!("tags"; "phase: {}", BuildPhase::Rendered);

        let changed = resolved.writer.write(&text)?;
        debug!("tags"; "phase: {}", BuildPhase::Written);

        resolved.writer.register(files, &config.build.output);
        debug!("tags"; "phase: {}", BuildPhase::Injected);

        log!(
            "tags";
            "{} from {}{}",
            plural_count(index.len(), "tag"),
            plural_count(documents.len(), "document"),
            if changed { "" } else { " (unchanged)" }
        );
        Ok(())
    }

    /// Prepend a line of tag links to a tagged page.
    fn tag_buttons(&self, markdown: String, page: &Page<'_>) -> String {
        let State::Ready(resolved) = &self.state else {
            return markdown;
        };
        if !resolved.buttons || page.meta.tags.is_empty() {
            return markdown;
        }

        let buttons: Vec<String> = page
            .meta
            .tags
            .iter()
            .map(|tag| format!("[{tag}]({}#{}){{.button}}", resolved.page_url, slugify(tag)))
            .collect();
        format!("{}\n\n{markdown}", buttons.join(" "))
    }
}

impl Plugin for TagsPlugin {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn on_config(&mut self, config: &SiteConfig) -> Result<()> {
        Ok(self.configure(config)?)
    }

    fn on_files(&mut self, files: &mut Files, config: &SiteConfig) -> Result<()> {
        Ok(self.generate(files, config)?)
    }

    fn on_page_markdown(
        &self,
        markdown: String,
        page: &Page<'_>,
        _config: &SiteConfig,
    ) -> Result<String> {
        Ok(self.tag_buttons(markdown, page))
    }
}

/// Parse frontmatter of every content page, in file order.
///
/// Malformed frontmatter and non-UTF-8 text are logged and the page counts
/// as untagged; only unreadable files are errors.
pub fn collect_documents(files: &Files) -> Result<Vec<Document>, TagsError> {
    files
        .documentation_pages()
        .map(|file| {
            let path = file.abs_src_path();
            let bytes = fs::read(&path).map_err(|source| TagsError::Read {
                path: path.clone(),
                source,
            })?;
            let document = match String::from_utf8(bytes) {
                Ok(source) => Document::parse(file.src_path.as_str(), &source).0,
                Err(_) => {
                    log!("warning"; "{}: not valid UTF-8, treating page as untagged", file.src_path);
                    Document::new(file.src_path.as_str(), PageMeta::default())
                }
            };
            Ok(document)
        })
        .collect()
}

/// Load the configured template, or the built-in one.
fn load_template(path: Option<&Path>) -> Result<Template, TagsError> {
    let Some(path) = path else {
        return Template::parse(TAGS_TEMPLATE_NAME, TAGS_TEMPLATE).map_err(|source| {
            TagsError::TemplateSyntax {
                path: PathBuf::from(TAGS_TEMPLATE_NAME),
                source,
            }
        });
    };

    let source = fs::read_to_string(path).map_err(|source| TagsError::TemplateNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    Template::parse(name, source).map_err(|source| TagsError::TemplateSyntax {
        path: path.to_path_buf(),
        source,
    })
}
