//! Tags page output.

use std::fs;
use std::path::{Path, PathBuf};

use super::TagsError;
use crate::debug;
use crate::host::{File, Files};

/// Writes the tags page into its folder and registers it with the host.
#[derive(Debug, Clone)]
pub struct AuxWriter {
    folder: PathBuf,
    filename: String,
}

impl AuxWriter {
    pub fn new(folder: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.filename)
    }

    /// Write `text`, creating missing directories.
    ///
    /// Returns `false` when the file already held exactly `text` and was
    /// left untouched, so unchanged builds do not bump its mtime.
    pub fn write(&self, text: &str) -> Result<bool, TagsError> {
        let path = self.path();
        if fs::read_to_string(&path).is_ok_and(|existing| existing == text) {
            debug!("tags"; "{} unchanged", path.display());
            return Ok(false);
        }

        let parent = path.parent().unwrap_or(&self.folder);
        fs::create_dir_all(parent).map_err(|source| TagsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| TagsError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(true)
    }

    /// Add the written page to the build as a generated file.
    pub fn register(&self, files: &mut Files, dest_dir: &Path) {
        files.push(File::generated(&self.filename, &self.folder, dest_dir));
    }
}
