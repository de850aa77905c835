//! Build file set.

use anyhow::{Result, bail};
use jwalk::WalkDir;
use std::path::{Path, PathBuf};

use crate::utils::path::to_slash;

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// One file taking part in a build.
///
/// `src_path` is relative to `src_dir` and `/`-separated; the staged copy
/// lands at the same relative path under `dest_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub src_path: String,
    pub src_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Written by a plugin during this build rather than found in content.
    pub generated: bool,
}

impl File {
    pub fn new(
        src_path: impl Into<String>,
        src_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            src_path: src_path.into(),
            src_dir: src_dir.into(),
            dest_dir: dest_dir.into(),
            generated: false,
        }
    }

    /// A file produced by a plugin outside the content tree.
    pub fn generated(
        src_path: impl Into<String>,
        src_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            generated: true,
            ..Self::new(src_path, src_dir, dest_dir)
        }
    }

    pub fn abs_src_path(&self) -> PathBuf {
        self.src_dir.join(&self.src_path)
    }

    pub fn abs_dest_path(&self) -> PathBuf {
        self.dest_dir.join(&self.src_path)
    }

    pub fn is_markdown(&self) -> bool {
        Path::new(&self.src_path)
            .extension()
            .is_some_and(|ext| ext == "md")
    }
}

/// Ordered collection of build files, unique by `src_path`.
#[derive(Debug, Clone, Default)]
pub struct Files {
    files: Vec<File>,
}

impl Files {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every file below `content_dir` in sorted, deterministic order.
    pub fn collect(content_dir: &Path, dest_dir: &Path) -> Result<Self> {
        if !content_dir.is_dir() {
            bail!(
                "content directory `{}` does not exist",
                content_dir.display()
            );
        }

        let files = WalkDir::new(content_dir)
            .sort(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                let name = e.file_name().to_str().unwrap_or_default();
                !IGNORED_FILES.contains(&name)
            })
            .filter_map(|e| {
                let path = e.path();
                let relative = path.strip_prefix(content_dir).ok()?;
                Some(File::new(to_slash(relative), content_dir, dest_dir))
            })
            .collect();

        Ok(Self { files })
    }

    /// Add a file, replacing any existing file with the same `src_path`.
    pub fn push(&mut self, file: File) {
        match self.files.iter_mut().find(|f| f.src_path == file.src_path) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
    }

    pub fn get(&self, src_path: &str) -> Option<&File> {
        self.files.iter().find(|f| f.src_path == src_path)
    }

    /// Markdown documents found in the content tree.
    pub fn documentation_pages(&self) -> impl Iterator<Item = &File> {
        self.files.iter().filter(|f| f.is_markdown() && !f.generated)
    }

    pub fn iter(&self) -> impl Iterator<Item = &File> {
        self.files.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
